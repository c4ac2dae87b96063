//! Turn a markdown source into the blocks the layout engine draws.
//!
//! Tree-sitter finds the headings, ATX (`#`) or setext (underlined), and the paragraphs; each
//! paragraph is then classified as prose, a list item, a display-math block or a media embed.
//! Headings carry the anchor id that the navigator scrolls to: an explicit `{#id}` suffix when
//! present, otherwise a slug of the title.

use crate::error::{Error, Result};
use crate::formats::Format;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// File extensions rendered as video rather than image placeholders.
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mov", "mkv"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The kind of an embedded media asset.
pub enum MediaKind {
    /// A still figure.
    Image,
    /// A video clip.
    Video,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A unit of document content in reading order.
pub enum Block {
    /// Section heading; the anchor for `id`.
    Heading {
        /// Heading level, 1 for `#`.
        level: usize,
        /// Title without markers or id attribute.
        title: String,
        /// Anchor id.
        id: String,
    },
    /// Prose paragraph, whitespace normalised.
    Paragraph(String),
    /// Bullet or numbered list entry.
    ListItem(String),
    /// A paragraph consisting only of `$$...$$`, holding the TeX between the delimiters.
    DisplayMath(String),
    /// An embedded asset written as `![alt](path)`.
    Media {
        /// Image or video, decided by file extension.
        kind: MediaKind,
        /// Alternative text.
        alt: String,
        /// Asset path as written in the document.
        path: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A parsed document.
pub struct Document {
    /// Blocks in source order.
    pub blocks: Vec<Block>,
}

/// A heading as seen by outline construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadingRef<'a> {
    /// Heading level, 1 for `#`.
    pub level: usize,
    /// Heading title.
    pub title: &'a str,
    /// Anchor id.
    pub id: &'a str,
}

impl Document {
    /// Headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = HeadingRef<'_>> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { level, title, id } => Some(HeadingRef {
                level: *level,
                title,
                id,
            }),
            _ => None,
        })
    }
}

#[must_use]
/// Lowercase the title and join its alphanumeric runs with `-`.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Split a trailing `{#id}` attribute from a heading title.
fn split_id_attribute(raw: &str) -> (String, Option<String>) {
    let trimmed = raw.trim();
    if let Some(body) = trimmed.strip_suffix('}') {
        if let Some(start) = body.rfind("{#") {
            let id = body[start + 2..].trim();
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (body[..start].trim().to_string(), Some(id.to_string()));
            }
        }
    }
    (trimmed.to_string(), None)
}

fn unique_id(candidate: String, used: &mut HashSet<String>) -> String {
    let base = if candidate.is_empty() {
        "section".to_string()
    } else {
        candidate
    };

    let mut id = base.clone();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }
    used.insert(id.clone());
    id
}

fn parse_media(text: &str) -> Option<Block> {
    let inner = text.strip_prefix("![")?.strip_suffix(')')?;
    let (alt, path) = inner.split_once("](")?;
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let is_video = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|video| ext.eq_ignore_ascii_case(video))
        });

    Some(Block::Media {
        kind: if is_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        },
        alt: alt.trim().to_string(),
        path: path.to_string(),
    })
}

fn heading_block(node: Node, source: &[u8], used: &mut HashSet<String>) -> Result<Block> {
    let mut level = 1;
    let mut raw_title = "";

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = child.kind();
        if let Some(n) = kind
            .strip_prefix("atx_h")
            .and_then(|rest| rest.strip_suffix("_marker"))
            .and_then(|digit| digit.parse().ok())
        {
            level = n;
        } else if kind == "setext_h1_underline" {
            level = 1;
        } else if kind == "setext_h2_underline" {
            level = 2;
        } else if kind == "inline" || kind == "paragraph" {
            // Setext titles sit in a paragraph and may span several lines
            raw_title = child
                .utf8_text(source)
                .map_err(|e| Error::Parse(e.to_string()))?;
        }
    }

    let raw_title = raw_title.split_whitespace().collect::<Vec<_>>().join(" ");
    let (title, explicit_id) = split_id_attribute(&raw_title);
    let id = unique_id(explicit_id.unwrap_or_else(|| slugify(&title)), used);

    Ok(Block::Heading { level, title, id })
}

fn is_setext_title(node: Node) -> bool {
    node.parent().is_some_and(|parent| parent.kind() == "setext_heading")
}

fn paragraph_block(node: Node, source: &[u8]) -> Result<Block> {
    let raw = node
        .utf8_text(source)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(tex) = text
        .strip_prefix("$$")
        .and_then(|rest| rest.strip_suffix("$$"))
        .filter(|tex| !tex.trim().is_empty())
    {
        return Ok(Block::DisplayMath(tex.trim().to_string()));
    }
    if let Some(media) = parse_media(&text) {
        return Ok(media);
    }
    if node.parent().is_some_and(|parent| parent.kind() == "list_item") {
        return Ok(Block::ListItem(text));
    }
    Ok(Block::Paragraph(text))
}

/// Parse markdown `source` into blocks.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the grammar cannot be loaded, the query is invalid, or the
/// source cannot be parsed.
pub fn parse_document(source: &str, format: &impl Format) -> Result<Document> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("parser produced no tree".to_string()))?;

    let query =
        Query::new(&language, format.block_query()).map_err(|e| Error::Parse(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let bytes = source.as_bytes();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);

    let mut used_ids = HashSet::new();
    let mut positioned = Vec::new();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let block = match query.capture_names()[capture.index as usize] {
                "heading" => heading_block(node, bytes, &mut used_ids)?,
                "paragraph" if is_setext_title(node) => continue,
                "paragraph" => paragraph_block(node, bytes)?,
                _ => continue,
            };
            positioned.push((node.start_byte(), block));
        }
    }

    positioned.sort_by_key(|(start, _)| *start);
    positioned.dedup_by_key(|(start, _)| *start);

    let blocks: Vec<Block> = positioned.into_iter().map(|(_, block)| block).collect();
    tracing::debug!(blocks = blocks.len(), "parsed document");

    Ok(Document { blocks })
}

/// Read and parse a markdown file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`] as for
/// [`parse_document`].
pub fn load_document(path: &Path, format: &impl Format) -> Result<Document> {
    let source = fs::read_to_string(path)?;
    parse_document(&source, format)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
