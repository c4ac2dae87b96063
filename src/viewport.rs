//! The scrollable content pane: offset, bounds and smooth scrolling.
//!
//! The viewport is the scroll host for the navigator. It owns the scroll offset, animates
//! towards a target one tick at a time, and tells every registered listener about each offset
//! change. Listeners are removed by dropping the [`ScrollSubscription`] returned on
//! registration, so a view cannot leak its handler past its own lifetime.

use crate::navigator::ScrollHost;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Divisor applied to the remaining distance on each animation tick.
pub const DEFAULT_SMOOTHING: usize = 4;

type Listener = Box<dyn FnMut(usize)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Scroll position over laid-out content of known length.
pub struct Viewport {
    offset: usize,
    height: usize,
    content_len: usize,
    smoothing: usize,
    target: Option<usize>,
    listeners: Rc<RefCell<Listeners>>,
}

impl Viewport {
    #[must_use]
    /// Viewport at the top of `content_len` lines, showing `height` of them at once.
    ///
    /// A `smoothing` of 1 makes animated scrolls complete in a single tick.
    pub fn new(content_len: usize, height: usize, smoothing: usize) -> Self {
        Self {
            offset: 0,
            height,
            content_len,
            smoothing: smoothing.max(1),
            target: None,
            listeners: Rc::default(),
        }
    }

    #[must_use]
    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    /// Number of visible lines.
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    /// Total number of laid-out lines.
    pub fn content_len(&self) -> usize {
        self.content_len
    }

    #[must_use]
    /// Largest reachable offset. The last line may be scrolled to the top so that every
    /// anchor can be aligned with the top of the pane.
    pub fn max_offset(&self) -> usize {
        self.content_len.saturating_sub(1)
    }

    #[must_use]
    /// Whether a smooth scroll is still in progress.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Change the visible height, e.g. after a terminal resize.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Replace the content length after a relayout, clamping the offset.
    pub fn set_content_len(&mut self, content_len: usize) {
        self.content_len = content_len;
        self.target = self.target.map(|t| t.min(self.max_offset()));
        let clamped = self.offset.min(self.max_offset());
        self.move_to(clamped);
    }

    /// Register a callback run with the new offset after every scroll.
    ///
    /// Listeners must not register further listeners from inside the callback.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe(&self, listener: impl FnMut(usize) + 'static) -> ScrollSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));

        ScrollSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    #[must_use]
    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Scroll instantly by `delta` lines, cancelling any animation.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    /// Scroll instantly to `offset`, cancelling any animation.
    pub fn scroll_to(&mut self, offset: usize) {
        self.target = None;
        self.move_to(offset.min(self.max_offset()));
    }

    /// Advance a smooth scroll by one step. Returns whether the offset moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let distance = target.abs_diff(self.offset);
        let step = (distance / self.smoothing).max(1).min(distance);
        let next = if target > self.offset {
            self.offset + step
        } else {
            self.offset - step
        };

        if next == target {
            self.target = None;
        }
        self.move_to(next)
    }

    fn move_to(&mut self, offset: usize) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.notify();
        true
    }

    fn notify(&self) {
        let offset = self.offset;
        let mut listeners = self.listeners.borrow_mut();
        for (_, listener) in &mut listeners.entries {
            listener(offset);
        }
    }
}

impl ScrollHost for Viewport {
    fn smooth_scroll_to(&mut self, offset: usize) {
        let target = offset.min(self.max_offset());
        self.target = if target == self.offset {
            None
        } else {
            Some(target)
        };
    }
}

/// Registration of a scroll listener; the listener is removed when this is dropped.
pub struct ScrollSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl ScrollSubscription {
    /// Remove the listener now. Safe to call more than once and after the viewport is gone.
    pub fn unsubscribe(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
        self.listeners = Weak::new();
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
