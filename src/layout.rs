//! Lay the document out into terminal lines and record where each anchor lands.
//!
//! Offsets everywhere else in the crate are measured in these laid-out lines: the viewport
//! scrolls over them and the navigator compares the scroll offset against the anchor map
//! built here. A relayout (for example after a resize) rebuilds both together so they can
//! never disagree.

use crate::input::{Block, Document, MediaKind};
use crate::math::{self, MathOptions, Segment};
use crate::navigator::Anchors;
use std::collections::HashMap;

/// Narrowest width the layout will wrap to.
pub const MIN_WIDTH: usize = 20;

const BULLET: &str = "• ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a laid-out line belongs to, used to pick its style.
pub enum LineKind {
    /// Spacing between blocks.
    Blank,
    /// A heading line at the given level.
    Heading(usize),
    /// Paragraph prose.
    Text,
    /// A list entry, bullet included on its first line.
    ListItem,
    /// Display math.
    Math,
    /// Placeholder for an image or video.
    Media,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether a run of text is prose or typeset math.
pub enum SpanKind {
    /// Prose.
    Text,
    /// Typeset math.
    Math,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A styled run within a line.
pub struct StyledText {
    /// Prose or math.
    pub kind: SpanKind,
    /// The characters of the run.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One row of the content pane.
pub struct RenderedLine {
    /// The block type this line came from.
    pub kind: LineKind,
    /// Styled runs, left to right.
    pub spans: Vec<StyledText>,
}

impl RenderedLine {
    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            spans: Vec::new(),
        }
    }

    fn plain(kind: LineKind, text: String) -> Self {
        Self {
            kind,
            spans: vec![StyledText {
                kind: SpanKind::Text,
                text,
            }],
        }
    }

    #[must_use]
    /// The line's characters without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    #[must_use]
    /// Width in characters.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }
}

/// An unbreakable run of styled pieces, i.e. a word.
type Token = Vec<StyledText>;

fn token_width(token: &Token) -> usize {
    token.iter().map(|piece| piece.text.chars().count()).sum()
}

fn push_piece(spans: &mut Vec<StyledText>, kind: SpanKind, text: &str) {
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => spans.push(StyledText {
            kind,
            text: text.to_string(),
        }),
    }
}

/// Split prose with embedded math into words, keeping punctuation glued to adjacent math.
fn tokenize(text: &str, options: &MathOptions) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut glue = false;

    for segment in math::split(text, options) {
        let (kind, content) = match segment {
            Segment::Text(s) => (SpanKind::Text, s),
            Segment::Math { tex, .. } => (SpanKind::Math, math::typeset(&tex)),
        };

        let starts_with_space = content.starts_with(char::is_whitespace);
        for (i, word) in content.split_whitespace().enumerate() {
            let piece = StyledText {
                kind,
                text: word.to_string(),
            };
            match tokens.last_mut() {
                Some(last) if i == 0 && glue && !starts_with_space => last.push(piece),
                _ => tokens.push(vec![piece]),
            }
        }

        glue = !content.is_empty() && !content.ends_with(char::is_whitespace);
    }

    tokens
}

/// Greedy word wrap of tokens into lines no wider than `width` where possible.
fn wrap(tokens: Vec<Token>, width: usize) -> Vec<Vec<StyledText>> {
    let mut lines = Vec::new();
    let mut current: Vec<StyledText> = Vec::new();
    let mut current_width = 0;

    for token in tokens {
        let w = token_width(&token);
        if current_width > 0 && current_width + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            push_piece(&mut current, SpanKind::Text, " ");
            current_width += 1;
        }
        for piece in &token {
            push_piece(&mut current, piece.kind, &piece.text);
        }
        current_width += w;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The whole document as terminal lines, plus the line each anchor id starts on.
#[derive(Clone, Debug)]
pub struct Layout {
    lines: Vec<RenderedLine>,
    anchors: HashMap<String, usize>,
    width: usize,
}

impl Layout {
    #[must_use]
    /// Lay out `document` for a pane `width` characters wide.
    pub fn new(document: &Document, width: usize, options: &MathOptions) -> Self {
        let width = width.max(MIN_WIDTH);
        let mut lines: Vec<RenderedLine> = Vec::new();
        let mut anchors = HashMap::new();
        let mut previous: Option<&Block> = None;

        for block in &document.blocks {
            // List items in a run sit on consecutive lines
            let tight = matches!(
                (previous, block),
                (Some(Block::ListItem(_)), Block::ListItem(_))
            );
            if previous.is_some() && !tight {
                lines.push(RenderedLine::blank());
            }

            match block {
                Block::Heading { level, title, id } => {
                    anchors.insert(id.clone(), lines.len());
                    for spans in wrap(tokenize(title, options), width) {
                        lines.push(RenderedLine {
                            kind: LineKind::Heading(*level),
                            spans,
                        });
                    }
                }
                Block::Paragraph(text) => {
                    for spans in wrap(tokenize(text, options), width) {
                        lines.push(RenderedLine {
                            kind: LineKind::Text,
                            spans,
                        });
                    }
                }
                Block::ListItem(text) => {
                    let indent = BULLET.chars().count();
                    let wrapped = wrap(tokenize(text, options), width - indent);
                    for (i, mut spans) in wrapped.into_iter().enumerate() {
                        let prefix = if i == 0 {
                            BULLET.to_string()
                        } else {
                            " ".repeat(indent)
                        };
                        spans.insert(
                            0,
                            StyledText {
                                kind: SpanKind::Text,
                                text: prefix,
                            },
                        );
                        lines.push(RenderedLine {
                            kind: LineKind::ListItem,
                            spans,
                        });
                    }
                }
                Block::DisplayMath(tex) => {
                    let typeset = math::typeset(tex);
                    let len = typeset.chars().count();
                    if len <= width {
                        let pad = " ".repeat((width - len) / 2);
                        lines.push(RenderedLine {
                            kind: LineKind::Math,
                            spans: vec![
                                StyledText {
                                    kind: SpanKind::Text,
                                    text: pad,
                                },
                                StyledText {
                                    kind: SpanKind::Math,
                                    text: typeset,
                                },
                            ],
                        });
                    } else {
                        let tokens = typeset
                            .split_whitespace()
                            .map(|word| {
                                vec![StyledText {
                                    kind: SpanKind::Math,
                                    text: word.to_string(),
                                }]
                            })
                            .collect();
                        for spans in wrap(tokens, width) {
                            lines.push(RenderedLine {
                                kind: LineKind::Math,
                                spans,
                            });
                        }
                    }
                }
                Block::Media { kind, alt, path } => {
                    let label = match (kind, alt.is_empty()) {
                        (MediaKind::Image, true) => format!("[image] {path}"),
                        (MediaKind::Image, false) => format!("[image] {alt} ({path})"),
                        (MediaKind::Video, true) => format!("[video] {path}"),
                        (MediaKind::Video, false) => format!("[video] {alt} ({path})"),
                    };
                    lines.push(RenderedLine::plain(LineKind::Media, label));
                }
            }

            previous = Some(block);
        }

        Self {
            lines,
            anchors,
            width,
        }
    }

    #[must_use]
    /// All laid-out lines, top to bottom.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    #[must_use]
    /// Number of laid-out lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    /// Whether the document produced no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    /// Width the text was wrapped to.
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    /// The anchor map, id to top line.
    pub fn anchors(&self) -> &HashMap<String, usize> {
        &self.anchors
    }
}

impl Anchors for Layout {
    fn anchor_top(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
