//! slamdoc: A terminal reader for the SLAM drone navigation report.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use slamdoc::app_state::AppState;
use slamdoc::config::Config;
use slamdoc::formats::markdown::MarkdownFormat;
use slamdoc::section::Outline;
use slamdoc::ui::{self, Panes};
use slamdoc::{input, outline};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "SLAMDOC_LOG";

#[derive(Parser)]
#[command(name = "slamdoc")]
#[command(about = "Scroll-synced table of contents reader for the SLAM report", long_about = None)]
struct Args {
    /// Markdown document to read instead of the bundled report
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Configuration file (defaults to slamdoc.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the flattened table of contents as JSON and exit
    #[arg(long)]
    print_toc: bool,

    /// Write tracing output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // The terminal UI owns stdout, so logs only go to a file
    if let Some(log_file) = &args.log_file {
        init_logging(log_file)?;
    }

    let cfg = Config::load(args.config.as_deref())?;
    let (document, outline) = load(args.path.as_deref())?;

    if args.print_toc {
        let json = serde_json::to_string_pretty(outline.flatten()).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    tracing::info!(sections = outline.flatten().len(), "starting reader");
    let result = run_tui(document, outline, &cfg);
    tracing::info!(ok = result.is_ok(), "reader closed");
    result
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load(path: Option<&Path>) -> io::Result<(input::Document, Outline)> {
    let format = MarkdownFormat;
    match path {
        Some(path) => {
            let document = input::load_document(path, &format)?;
            let outline = outline::from_headings(document.headings())?;
            Ok((document, outline))
        }
        None => {
            let document = input::parse_document(outline::REPORT_SOURCE, &format)?;
            Ok((document, outline::report_outline()?))
        }
    }
}

/// Raw mode, alternate screen and mouse capture, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).inspect_err(|_| {
            teardown_terminal();
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).inspect_err(|_| {
            teardown_terminal();
        })?;

        Ok(Self { terminal })
    }

    fn area(&self) -> io::Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}

fn run_tui(document: input::Document, outline: Outline, cfg: &Config) -> io::Result<()> {
    let mut session = TerminalSession::new()?;
    let mut panes = Panes::split(session.area()?, cfg);
    let (width, height) = panes.content_size();

    let mut app = AppState::new(document, outline, cfg, width, height);
    let tick = Duration::from_millis(cfg.tick_ms.max(1));

    while !app.should_quit {
        session.draw(|f| ui::draw(f, &mut app, cfg))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, &panes),
                Event::Resize(columns, rows) => {
                    panes = Panes::split(Rect::new(0, 0, columns, rows), cfg);
                    let (width, height) = panes.content_size();
                    app.resize(width, height);
                }
                _ => {}
            }
        }

        app.tick();
    }

    Ok(())
}
