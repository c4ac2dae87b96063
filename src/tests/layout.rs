use super::{Layout, LineKind, SpanKind, MIN_WIDTH};
use crate::formats::markdown::MarkdownFormat;
use crate::input::{parse_document, Block, Document};
use crate::math::MathOptions;
use crate::navigator::Anchors;
use crate::outline::{report_outline, REPORT_SOURCE};

fn layout(source: &str, width: usize) -> Layout {
    let doc = parse_document(source, &MarkdownFormat).unwrap();
    Layout::new(&doc, width, &MathOptions::default())
}

#[test]
fn test_lines_respect_wrap_width() {
    let layout = layout(REPORT_SOURCE, 60);

    for line in layout.lines() {
        if line.kind == LineKind::Text || line.kind == LineKind::ListItem {
            assert!(line.width() <= 60, "line too wide: {:?}", line.text());
        }
    }
}

#[test]
fn test_anchor_lines_point_at_headings() {
    let layout = layout(REPORT_SOURCE, 80);
    let outline = report_outline().unwrap();

    for section in outline.flatten() {
        let top = layout.anchor_top(&section.id).unwrap();
        let line = &layout.lines()[top];
        assert!(matches!(line.kind, LineKind::Heading(_)));
        assert!(line.text().starts_with(&section.title[..3]));
    }
}

#[test]
fn test_anchors_increase_in_outline_order() {
    let layout = layout(REPORT_SOURCE, 80);
    let outline = report_outline().unwrap();

    let tops: Vec<usize> = outline
        .flatten()
        .iter()
        .map(|s| layout.anchor_top(&s.id).unwrap())
        .collect();

    assert!(tops.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_narrower_width_produces_more_lines() {
    let wide = layout(REPORT_SOURCE, 120);
    let narrow = layout(REPORT_SOURCE, 40);

    assert!(narrow.len() > wide.len());
    assert!(narrow.anchor_top("references") > wide.anchor_top("references"));
}

#[test]
fn test_width_has_a_floor() {
    let layout = layout("# A\n\nsome text\n", 3);

    assert_eq!(layout.width(), MIN_WIDTH);
}

#[test]
fn test_blank_line_between_blocks_but_not_list_items() {
    let layout = layout("# A\n\npara\n\n- one\n- two\n", 40);
    let kinds: Vec<LineKind> = layout.lines().iter().map(|l| l.kind).collect();

    assert_eq!(
        kinds,
        vec![
            LineKind::Heading(1),
            LineKind::Blank,
            LineKind::Text,
            LineKind::Blank,
            LineKind::ListItem,
            LineKind::ListItem,
        ]
    );
    assert_eq!(layout.lines()[4].text(), "• one");
}

#[test]
fn test_list_item_continuation_is_indented() {
    let layout = layout(
        "- alpha beta gamma delta epsilon zeta eta theta iota kappa\n",
        MIN_WIDTH,
    );

    assert!(layout.len() > 1);
    assert!(layout.lines()[1].text().starts_with("  "));
}

#[test]
fn test_inline_math_is_typeset_and_tagged() {
    let layout = layout("# A\n\nwhen $x^2$ grows\n", 40);
    let line = &layout.lines()[2];

    assert_eq!(line.text(), "when x² grows");
    assert!(line
        .spans
        .iter()
        .any(|s| s.kind == SpanKind::Math && s.text == "x²"));
}

#[test]
fn test_punctuation_sticks_to_math() {
    let layout = layout("threshold $t$.\n", 40);

    assert_eq!(layout.lines()[0].text(), "threshold t.");
}

#[test]
fn test_display_math_is_centred() {
    let doc = Document {
        blocks: vec![Block::DisplayMath("a+b".to_string())],
    };
    let layout = Layout::new(&doc, 21, &MathOptions::default());
    let line = &layout.lines()[0];

    assert_eq!(line.kind, LineKind::Math);
    assert_eq!(line.text(), "         a+b");
}

#[test]
fn test_media_placeholders() {
    let layout = layout("![orb](images/orb.jpg)\n\n![](test4.mp4)\n", 60);
    let texts: Vec<String> = layout
        .lines()
        .iter()
        .filter(|l| l.kind == LineKind::Media)
        .map(super::RenderedLine::text)
        .collect();

    assert_eq!(texts, vec!["[image] orb (images/orb.jpg)", "[video] test4.mp4"]);
}
