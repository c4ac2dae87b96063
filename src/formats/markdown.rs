//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the tree-sitter query for parsing markdown documents into ATX-style
//! headings (# syntax), setext headings (underlined with = or -), paragraphs and list items.

use crate::formats::Format;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tree-sitter queries for markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "(atx_heading) @heading (setext_heading) @heading (paragraph) @paragraph"
    }

    fn format_heading_display(&self, level: usize, title: &str) -> Line<'static> {
        let color = match level {
            1 => Color::Magenta,
            2 => Color::Cyan,
            3 => Color::Green,
            _ => Color::Yellow,
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        Line::from(vec![Span::styled(title.to_string(), style)])
    }
}
