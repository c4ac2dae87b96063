//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over document formats by providing
//! the tree-sitter language, the queries that pick out headings and body blocks, and the
//! styling used when a heading is drawn in the content pane.

use ratatui::text::Line;

pub mod markdown;

/// Tree-sitter grammar, block queries and heading styling for one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every block of interest, with capture names `heading` and `paragraph`.
    fn block_query(&self) -> &str;
    /// Styled heading line for a heading at `level` (1 for top-level).
    fn format_heading_display(&self, level: usize, title: &str) -> Line<'static>;
}
