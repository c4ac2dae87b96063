use super::{load_document, parse_document, slugify, Block, MediaKind};
use crate::formats::markdown::MarkdownFormat;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_headings_with_explicit_ids() {
    let doc = parse_document(
        "# Study {#title}\n\n## 1. Abstract {#abstract}\n\nBody text.\n",
        &MarkdownFormat,
    )
    .unwrap();

    let headings: Vec<(usize, &str, &str)> =
        doc.headings().map(|h| (h.level, h.title, h.id)).collect();

    assert_eq!(
        headings,
        vec![(1, "Study", "title"), (2, "1. Abstract", "abstract")]
    );
}

#[test]
fn test_heading_ids_fall_back_to_unique_slugs() {
    let doc = parse_document(
        "## Overview\n\ntext\n\n## Overview\n\nmore\n\n### 2.1 Background\n",
        &MarkdownFormat,
    )
    .unwrap();

    let ids: Vec<&str> = doc.headings().map(|h| h.id).collect();

    assert_eq!(ids, vec!["overview", "overview-2", "2-1-background"]);
}

#[test]
fn test_setext_headings_are_read() {
    let doc = parse_document(
        "Overview\n========\n\nBody text.\n\nKITTI Setup {#kitti}\n-----------\n\nMore.\n",
        &MarkdownFormat,
    )
    .unwrap();

    let headings: Vec<(usize, &str, &str)> =
        doc.headings().map(|h| (h.level, h.title, h.id)).collect();

    assert_eq!(
        headings,
        vec![(1, "Overview", "overview"), (2, "KITTI Setup", "kitti")]
    );
    // The underlined title is not repeated as a paragraph
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 1,
                title: "Overview".to_string(),
                id: "overview".to_string(),
            },
            Block::Paragraph("Body text.".to_string()),
            Block::Heading {
                level: 2,
                title: "KITTI Setup".to_string(),
                id: "kitti".to_string(),
            },
            Block::Paragraph("More.".to_string()),
        ]
    );
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("3. Literature Review / Related Work"), "3-literature-review-related-work");
    assert_eq!(slugify("  "), "");
}

#[test]
fn test_paragraph_whitespace_is_normalised() {
    let doc = parse_document("# T\n\nfirst line\nsecond   line\n", &MarkdownFormat).unwrap();

    assert_eq!(
        doc.blocks[1],
        Block::Paragraph("first line second line".to_string())
    );
}

#[test]
fn test_blocks_are_classified() {
    let source = "\
# Results

- Tracking: estimates pose.
- Mapping: builds the map.

$$E = \\sum_i r_i^2$$

![orb trajectory](images/orb.jpg)

![](test4.mp4)
";
    let doc = parse_document(source, &MarkdownFormat).unwrap();

    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 1,
                title: "Results".to_string(),
                id: "results".to_string(),
            },
            Block::ListItem("Tracking: estimates pose.".to_string()),
            Block::ListItem("Mapping: builds the map.".to_string()),
            Block::DisplayMath("E = \\sum_i r_i^2".to_string()),
            Block::Media {
                kind: MediaKind::Image,
                alt: "orb trajectory".to_string(),
                path: "images/orb.jpg".to_string(),
            },
            Block::Media {
                kind: MediaKind::Video,
                alt: String::new(),
                path: "test4.mp4".to_string(),
            },
        ]
    );
}

#[test]
fn test_load_document_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# Hello\n\n?\n\n## World\n\n??").unwrap();

    let doc = load_document(file.path(), &MarkdownFormat).unwrap();
    let titles: Vec<&str> = doc.headings().map(|h| h.title).collect();

    assert_eq!(titles, vec!["Hello", "World"]);
    assert_eq!(doc.blocks.len(), 4);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = load_document(std::path::Path::new("/nonexistent/report.md"), &MarkdownFormat);

    assert!(matches!(result, Err(crate::error::Error::Io(_))));
}
