//! The state of one reading session, bridging the layout, the viewport and the navigator.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! scrolls and jumps around. The viewport owns the scroll offset; the navigator owns the active
//! section. They are connected by a single scroll listener registered when the state is built
//! and removed when it is dropped, so every offset change, whether from a key press, the mouse
//! wheel or a smooth-scroll animation frame, recomputes the active section.

use crate::config::Config;
use crate::input::Document;
use crate::layout::Layout;
use crate::math::MathOptions;
use crate::navigator::Navigator;
use crate::section::{FlatSection, Outline};
use crate::ui::Panes;
use crate::viewport::{ScrollSubscription, Viewport};
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which pane receives navigation keys.
pub enum Focus {
    /// Arrow keys scroll the document.
    Content,
    /// Arrow keys move the table of contents cursor.
    Toc,
}

/// Reading session state.
pub struct AppState {
    /// The parsed document being read.
    pub document: Document,
    /// Pane receiving navigation keys.
    pub focus: Focus,
    /// Highlighted row of the table of contents while it has focus.
    pub toc_cursor: usize,
    /// First table of contents row currently drawn, for mapping mouse clicks.
    pub toc_offset: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Set when the user asks to quit.
    pub should_quit: bool,
    /// Scroll position of the content pane.
    pub viewport: Viewport,
    layout: Rc<RefCell<Layout>>,
    navigator: Rc<RefCell<Navigator>>,
    math: MathOptions,
    wrap_width: usize,
    scroll_step: usize,
    _scroll_subscription: ScrollSubscription,
}

impl AppState {
    #[must_use]
    /// Lay the document out for a content pane of `width` x `height` and start at the top.
    pub fn new(
        document: Document,
        outline: Outline,
        cfg: &Config,
        width: usize,
        height: usize,
    ) -> Self {
        let math = cfg.math_options();
        let layout = Layout::new(&document, cfg.wrap_width.min(width), &math);
        let viewport = Viewport::new(layout.len(), height, cfg.scroll_smoothing);

        let layout = Rc::new(RefCell::new(layout));
        let navigator = Rc::new(RefCell::new(Navigator::new(
            outline,
            cfg.lookahead_margin,
        )));

        let listener_layout = Rc::clone(&layout);
        let listener_navigator = Rc::clone(&navigator);
        let scroll_subscription = viewport.subscribe(move |offset| {
            let layout = listener_layout.borrow();
            listener_navigator
                .borrow_mut()
                .recompute_active_from_scroll(offset, &*layout);
        });

        Self {
            document,
            focus: Focus::Content,
            toc_cursor: 0,
            toc_offset: 0,
            message: None,
            should_quit: false,
            viewport,
            layout,
            navigator,
            math,
            wrap_width: cfg.wrap_width,
            scroll_step: cfg.scroll_step.max(1),
            _scroll_subscription: scroll_subscription,
        }
    }

    #[must_use]
    /// Id of the section currently in view.
    pub fn active_id(&self) -> String {
        self.navigator.borrow().active_id().to_string()
    }

    #[must_use]
    /// Shared handle to the current layout.
    pub fn layout(&self) -> Ref<'_, Layout> {
        self.layout.borrow()
    }

    #[must_use]
    /// Flattened table of contents, borrowed from the navigator.
    pub fn toc(&self) -> Ref<'_, [FlatSection]> {
        Ref::map(self.navigator.borrow(), |navigator| navigator.outline().flatten())
    }

    #[must_use]
    /// The outline, borrowed from the navigator.
    pub fn outline(&self) -> Ref<'_, Outline> {
        Ref::map(self.navigator.borrow(), Navigator::outline)
    }

    #[must_use]
    /// Titles from the top level down to the active section, joined with ` > `.
    pub fn breadcrumb(&self) -> String {
        let navigator = self.navigator.borrow();
        navigator
            .outline()
            .path_to(navigator.active_id())
            .iter()
            .map(|section| section.title.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Scroll by `steps` multiples of the configured step.
    pub fn scroll_lines(&mut self, steps: isize) {
        let step = isize::try_from(self.scroll_step).unwrap_or(1);
        self.viewport.scroll_by(steps.saturating_mul(step));
    }

    /// Scroll down by one page, keeping two lines of context.
    pub fn page_down(&mut self) {
        let page = isize::try_from(self.viewport.height().saturating_sub(2).max(1)).unwrap_or(1);
        self.viewport.scroll_by(page);
    }

    /// Scroll up by one page, keeping two lines of context.
    pub fn page_up(&mut self) {
        let page = isize::try_from(self.viewport.height().saturating_sub(2).max(1)).unwrap_or(1);
        self.viewport.scroll_by(-page);
    }

    /// Jump straight to the top of the document.
    pub fn scroll_to_top(&mut self) {
        self.viewport.scroll_to(0);
    }

    /// Jump straight to the end of the document.
    pub fn scroll_to_bottom(&mut self) {
        let bottom = self.viewport.max_offset();
        self.viewport.scroll_to(bottom);
    }

    /// Advance any smooth scroll in progress. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.viewport.tick()
    }

    /// Smooth-scroll to a section and make it active.
    ///
    /// Does nothing when the section has no anchor in the document.
    pub fn jump_to(&mut self, id: &str) -> bool {
        let layout = self.layout.borrow();
        let jumped = self
            .navigator
            .borrow_mut()
            .jump_to(id, &*layout, &mut self.viewport);
        if !jumped {
            self.message = Some(format!("No anchor for section '{id}'"));
        }
        jumped
    }

    fn jump_with(&mut self, target: impl FnOnce(&Navigator) -> Option<&str>) -> bool {
        let id = target(&self.navigator.borrow()).map(str::to_string);
        id.is_some_and(|id| self.jump_to(&id))
    }

    /// Jump to the section after the active one.
    pub fn jump_next(&mut self) -> bool {
        self.jump_with(Navigator::next_id)
    }

    /// Jump to the section before the active one.
    pub fn jump_prev(&mut self) -> bool {
        self.jump_with(Navigator::prev_id)
    }

    /// Jump to the next section at the same level.
    pub fn jump_next_sibling(&mut self) -> bool {
        self.jump_with(Navigator::next_sibling_id)
    }

    /// Jump to the previous section at the same level.
    pub fn jump_prev_sibling(&mut self) -> bool {
        self.jump_with(Navigator::prev_sibling_id)
    }

    /// Jump to the section containing the active one.
    pub fn jump_parent(&mut self) -> bool {
        self.jump_with(Navigator::parent_id)
    }

    /// Switch keyboard focus between the document and the table of contents.
    ///
    /// Entering the table of contents puts its cursor on the active section.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content => {
                let navigator = self.navigator.borrow();
                self.toc_cursor = navigator
                    .outline()
                    .position(navigator.active_id())
                    .unwrap_or(0);
                Focus::Toc
            }
            Focus::Toc => Focus::Content,
        };
    }

    /// Move the table of contents cursor up.
    pub fn toc_up(&mut self) {
        self.toc_cursor = self.toc_cursor.saturating_sub(1);
    }

    /// Move the table of contents cursor down.
    pub fn toc_down(&mut self) {
        let last = self.toc().len().saturating_sub(1);
        self.toc_cursor = (self.toc_cursor + 1).min(last);
    }

    /// Jump to the section under the table of contents cursor.
    pub fn toc_select(&mut self) -> bool {
        self.jump_to_toc_index(self.toc_cursor)
    }

    /// Jump to the table of contents entry drawn on visible row `row`.
    pub fn click_toc_row(&mut self, row: usize) -> bool {
        let index = self.toc_offset + row;
        if index >= self.toc().len() {
            return false;
        }
        self.toc_cursor = index;
        self.jump_to_toc_index(index)
    }

    fn jump_to_toc_index(&mut self, index: usize) -> bool {
        let id = self.toc().get(index).map(|section| section.id.clone());
        id.is_some_and(|id| self.jump_to(&id))
    }

    /// Apply a key press.
    ///
    /// Arrow keys and `j`/`k` scroll the document or move the table of contents cursor,
    /// depending on focus. Section jumps, paging and quitting work in either pane.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        match (self.focus, key.code) {
            (_, KeyCode::Char('q') | KeyCode::Esc) => self.should_quit = true,
            (_, KeyCode::Tab) => self.toggle_focus(),

            (Focus::Toc, KeyCode::Down | KeyCode::Char('j')) => self.toc_down(),
            (Focus::Toc, KeyCode::Up | KeyCode::Char('k')) => self.toc_up(),
            (Focus::Toc, KeyCode::Enter) => {
                self.toc_select();
            }

            (Focus::Content, KeyCode::Down | KeyCode::Char('j')) => self.scroll_lines(1),
            (Focus::Content, KeyCode::Up | KeyCode::Char('k')) => self.scroll_lines(-1),

            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.page_down(),
            (_, KeyCode::PageUp) => self.page_up(),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.scroll_to_top(),
            (_, KeyCode::End | KeyCode::Char('G')) => self.scroll_to_bottom(),
            (_, KeyCode::Char('n')) => {
                self.jump_next();
            }
            (_, KeyCode::Char('p')) => {
                self.jump_prev();
            }
            (_, KeyCode::Char('N')) => {
                self.jump_next_sibling();
            }
            (_, KeyCode::Char('P')) => {
                self.jump_prev_sibling();
            }
            (_, KeyCode::Char('u')) => {
                self.jump_parent();
            }
            _ => {}
        }
    }

    /// Apply a mouse event: the wheel scrolls, a left click on a contents row jumps to it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, panes: &Panes) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_lines(1),
            MouseEventKind::ScrollUp => self.scroll_lines(-1),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = panes.sidebar_row(mouse.column, mouse.row) {
                    self.click_toc_row(row);
                }
            }
            _ => {}
        }
    }

    /// Adapt to a new content pane size.
    ///
    /// A width change relays the document out; the active section's heading is then brought
    /// back to the top so the reader keeps their place.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.set_height(height);

        let wrap = self.wrap_width.min(width);
        if self.layout.borrow().width() == wrap.max(crate::layout::MIN_WIDTH) {
            return;
        }

        let relaid = Layout::new(&self.document, wrap, &self.math);
        let len = relaid.len();
        let active_top = relaid.anchors().get(&self.active_id()).copied();
        *self.layout.borrow_mut() = relaid;

        self.viewport.set_content_len(len);
        if let Some(top) = active_top {
            self.viewport.scroll_to(top);
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
