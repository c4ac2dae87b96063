//! The UI renders the reading session: table of contents, document and status bar.
//!
//! The sidebar is rebuilt from the outline on every frame by a recursive function of the
//! section tree and its depth, so the highlight always reflects the navigator's active section.

use crate::app_state::{AppState, Focus};
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::layout::{LineKind, RenderedLine, SpanKind};
use crate::section::Section;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListState, Paragraph},
    Frame,
};

const HELP: &str =
    "j/k: Scroll | n/p: Section | N/P: Sibling | u: Parent | Tab: Contents | Enter: Jump | q: Quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Screen areas of the three panes.
pub struct Panes {
    /// Table of contents, borders included.
    pub sidebar: Rect,
    /// Document body, borders included.
    pub content: Rect,
    /// Breadcrumb and help line.
    pub status: Rect,
}

impl Panes {
    #[must_use]
    /// Split the terminal area into sidebar, content and status bar.
    pub fn split(area: Rect, cfg: &Config) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(cfg.sidebar_width), Constraint::Min(0)])
            .split(rows[0]);

        Self {
            sidebar: columns[0],
            content: columns[1],
            status: rows[1],
        }
    }

    #[must_use]
    /// Width and height available to document text inside the content borders.
    pub fn content_size(&self) -> (usize, usize) {
        (
            usize::from(self.content.width.saturating_sub(2)),
            usize::from(self.content.height.saturating_sub(2)),
        )
    }

    #[must_use]
    /// The table of contents row under a screen position, if it is inside the sidebar list.
    pub fn sidebar_row(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Block::default().borders(Borders::ALL).inner(self.sidebar);
        let inside = column >= inner.x
            && column < inner.x + inner.width
            && row >= inner.y
            && row < inner.y + inner.height;
        inside.then(|| usize::from(row - inner.y))
    }
}

/// Which rows of the table of contents carry a highlight.
pub struct TocMarks<'a> {
    /// The active section, drawn reversed.
    pub active: &'a str,
    /// The cursor while the sidebar has focus, drawn underlined.
    pub cursor: Option<&'a str>,
}

#[must_use]
/// Table of contents lines for `sections` at `depth`, children following their parent.
pub fn toc_lines<'a>(
    sections: &'a [Section],
    depth: usize,
    marks: &TocMarks<'_>,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for section in sections {
        let mut style = Style::default();
        if depth == 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if section.id == marks.active {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if marks.cursor == Some(section.id.as_str()) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let indent = "  ".repeat(depth);
        lines.push(Line::from(format!("{indent}{}", section.title)).style(style));
        lines.extend(toc_lines(&section.children, depth + 1, marks));
    }
    lines
}

fn content_line(line: &RenderedLine, format: &MarkdownFormat) -> Line<'static> {
    match line.kind {
        LineKind::Heading(level) => format.format_heading_display(level, &line.text()),
        LineKind::Media => Line::from(Span::styled(
            line.text(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        _ => Line::from(
            line.spans
                .iter()
                .map(|span| match span.kind {
                    SpanKind::Text => Span::raw(span.text.clone()),
                    SpanKind::Math => Span::styled(
                        span.text.clone(),
                        Style::default().add_modifier(Modifier::ITALIC),
                    ),
                })
                .collect::<Vec<_>>(),
        ),
    }
}

/// Renders the reading session.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let panes = Panes::split(f.area(), cfg);
    draw_sidebar(f, app, panes.sidebar);
    draw_content(f, app, panes.content);
    draw_status(f, app, panes.status);
}

fn draw_sidebar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let border_style = match app.focus {
        Focus::Toc => Style::default().fg(Color::Cyan),
        Focus::Content => Style::default(),
    };

    let offset = {
        let outline = app.outline();
        let active = app.active_id();
        let cursor = match app.focus {
            Focus::Toc => outline
                .flatten()
                .get(app.toc_cursor)
                .map(|section| section.id.as_str()),
            Focus::Content => None,
        };
        let marks = TocMarks {
            active: &active,
            cursor,
        };

        // Keep the cursor in view while focused, otherwise the active section
        let selected = outline.position(cursor.unwrap_or(&active));
        let mut state = ListState::default()
            .with_offset(app.toc_offset)
            .with_selected(selected);

        let list = List::new(toc_lines(outline.roots(), 0, &marks)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Contents"),
        );

        f.render_stateful_widget(list, area, &mut state);
        state.offset()
    };
    app.toc_offset = offset;
}

fn draw_content(f: &mut Frame, app: &AppState, area: Rect) {
    let format = MarkdownFormat;
    let layout = app.layout();
    let offset = app.viewport.offset();
    let height = usize::from(area.height.saturating_sub(2));

    let lines: Vec<Line> = layout
        .lines()
        .iter()
        .skip(offset)
        .take(height)
        .map(|line| content_line(line, &format))
        .collect();

    let percent = if app.viewport.max_offset() == 0 {
        100
    } else {
        offset * 100 / app.viewport.max_offset()
    };
    let title = format!("Report ({percent}%)");

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let text = app.message.clone().unwrap_or_else(|| HELP.to_string());
    let status = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.breadcrumb()),
    );
    f.render_widget(status, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
