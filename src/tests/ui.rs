use super::{draw, toc_lines, Panes, TocMarks};
use crate::app_state::AppState;
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::parse_document;
use crate::outline::{report_outline, REPORT_SOURCE};
use crate::section::Section;
use ratatui::{backend::TestBackend, layout::Rect, style::Modifier, Terminal};

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_toc_lines_indent_children() {
    let roots = vec![
        Section::new("a", "A"),
        Section::with_children(
            "b",
            "B",
            vec![Section::with_children(
                "b-1",
                "B.1",
                vec![Section::new("b-1-1", "B.1.1")],
            )],
        ),
    ];
    let marks = TocMarks {
        active: "b-1",
        cursor: None,
    };

    let lines = toc_lines(&roots, 0, &marks);
    let text: Vec<String> = lines.iter().map(ToString::to_string).collect();

    assert_eq!(text, vec!["A", "B", "  B.1", "    B.1.1"]);
    assert!(lines[2].style.add_modifier.contains(Modifier::REVERSED));
    assert!(!lines[1].style.add_modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_toc_lines_mark_cursor() {
    let roots = vec![Section::new("a", "A"), Section::new("b", "B")];
    let marks = TocMarks {
        active: "a",
        cursor: Some("b"),
    };

    let lines = toc_lines(&roots, 0, &marks);

    assert!(lines[1].style.add_modifier.contains(Modifier::UNDERLINED));
    assert!(!lines[0].style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn test_sidebar_row_maps_inside_borders() {
    let cfg = Config::defaults().unwrap();
    let panes = Panes::split(Rect::new(0, 0, 120, 40), &cfg);

    assert_eq!(panes.sidebar.width, 34);
    assert_eq!(panes.sidebar_row(5, 1), Some(0));
    assert_eq!(panes.sidebar_row(5, 4), Some(3));
    // Border rows and the content pane are not entries
    assert_eq!(panes.sidebar_row(5, 0), None);
    assert_eq!(panes.sidebar_row(60, 4), None);
    assert_eq!(panes.content_size(), (84, 35));
}

#[test]
fn test_draw_shows_contents_and_breadcrumb() {
    let cfg = Config::defaults().unwrap();
    let panes = Panes::split(Rect::new(0, 0, 120, 40), &cfg);
    let (width, height) = panes.content_size();
    let document = parse_document(REPORT_SOURCE, &MarkdownFormat).unwrap();
    let mut app = AppState::new(document, report_outline().unwrap(), &cfg, width, height);
    app.jump_to("demo");

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| draw(f, &mut app, &cfg)).unwrap();
    let text = screen_text(&terminal);

    assert!(text.contains("Contents"));
    assert!(text.contains("1. Abstract"));
    assert!(text.contains("7. Demo of Simulation"));
    assert!(text.contains("Comparative Study of SLAM"));
}
