//! Keeps the active section in sync with the scroll position.
//!
//! The navigator never reads the terminal or measures anything itself. The caller supplies the
//! scroll offset and the anchor positions, and the navigator answers with an active section id
//! or a scroll request issued through a [`ScrollHost`]. This keeps the scan testable without a
//! rendering surface.

use crate::section::{FlatSection, Outline};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Lines below the viewport top within which a heading already counts as scrolled past.
pub const DEFAULT_LOOKAHEAD_MARGIN: usize = 1;

/// Source of anchor positions: the top line of each section's heading in the laid-out document.
pub trait Anchors {
    /// Top offset of the anchor for `id`, or `None` if nothing was rendered for it.
    fn anchor_top(&self, id: &str) -> Option<usize>;
}

impl<S: BuildHasher> Anchors for HashMap<String, usize, S> {
    fn anchor_top(&self, id: &str) -> Option<usize> {
        self.get(id).copied()
    }
}

/// Performs the actual scrolling on behalf of the navigator.
pub trait ScrollHost {
    /// Start an animated scroll towards `offset` and return without waiting for it.
    fn smooth_scroll_to(&mut self, offset: usize);
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The id of the section currently considered in view.
pub struct NavigationState {
    active_id: String,
}

impl NavigationState {
    #[must_use]
    /// State with `active_id` as the initially active section.
    pub fn new(active_id: impl Into<String>) -> Self {
        Self {
            active_id: active_id.into(),
        }
    }

    #[must_use]
    /// Currently active section id.
    pub fn get(&self) -> &str {
        &self.active_id
    }

    /// Replace the active section id.
    pub fn set(&mut self, id: impl Into<String>) {
        self.active_id = id.into();
    }
}

#[must_use]
/// Find the section that should be active at `scroll_offset`.
///
/// Walks the flattened sections from the last to the first and returns the first one whose
/// anchor top is at or above `scroll_offset + margin`. Sections without an anchor are skipped.
/// Returns `None` when no anchor has been reached yet.
pub fn active_for_scroll<'a, A: Anchors + ?Sized>(
    sections: &'a [FlatSection],
    scroll_offset: usize,
    margin: usize,
    anchors: &A,
) -> Option<&'a str> {
    let threshold = scroll_offset.saturating_add(margin);
    sections
        .iter()
        .rev()
        .find(|section| {
            anchors
                .anchor_top(&section.id)
                .is_some_and(|top| top <= threshold)
        })
        .map(|section| section.id.as_str())
}

/// Owns the outline and the navigation state for one document view.
pub struct Navigator {
    outline: Outline,
    state: NavigationState,
    lookahead_margin: usize,
}

impl Navigator {
    #[must_use]
    /// Navigator starting at the outline's first top-level section.
    pub fn new(outline: Outline, lookahead_margin: usize) -> Self {
        let state = NavigationState::new(outline.first_id());
        Self {
            outline,
            state,
            lookahead_margin,
        }
    }

    #[must_use]
    /// The table of contents this navigator walks.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// Read access to the navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    /// Currently active section id.
    pub fn active_id(&self) -> &str {
        self.state.get()
    }

    #[must_use]
    /// Margin added to the scroll offset when deciding whether a heading has been passed.
    pub fn lookahead_margin(&self) -> usize {
        self.lookahead_margin
    }

    /// Scroll to the anchor for `id` and make it active.
    ///
    /// The active id changes immediately, before the scroll animation has finished. When no
    /// anchor exists for `id` nothing happens: no scroll is requested and the active id is
    /// left as it was. Returns whether the jump took place.
    pub fn jump_to<A, H>(&mut self, id: &str, anchors: &A, host: &mut H) -> bool
    where
        A: Anchors + ?Sized,
        H: ScrollHost + ?Sized,
    {
        let Some(top) = anchors.anchor_top(id) else {
            tracing::debug!(id, "jump target has no anchor");
            return false;
        };

        tracing::debug!(id, top, "jumping to section");
        host.smooth_scroll_to(top);
        self.state.set(id);
        true
    }

    /// Update the active section for a new scroll offset.
    ///
    /// Leaves the active id untouched when the offset is above every anchor. Returns whether
    /// the active id changed.
    pub fn recompute_active_from_scroll<A: Anchors + ?Sized>(
        &mut self,
        scroll_offset: usize,
        anchors: &A,
    ) -> bool {
        let Some(id) = active_for_scroll(
            self.outline.flatten(),
            scroll_offset,
            self.lookahead_margin,
            anchors,
        ) else {
            return false;
        };

        if id == self.state.get() {
            return false;
        }

        tracing::trace!(id, scroll_offset, "active section changed");
        let id = id.to_string();
        self.state.set(id);
        true
    }

    fn active_index(&self) -> Option<usize> {
        self.outline.position(self.state.get())
    }

    fn id_at(&self, index: usize) -> Option<&str> {
        self.outline
            .flatten()
            .get(index)
            .map(|section| section.id.as_str())
    }

    #[must_use]
    /// Section following the active one in document order.
    pub fn next_id(&self) -> Option<&str> {
        let current = self.active_index()?;
        self.id_at(current + 1)
    }

    #[must_use]
    /// Section preceding the active one in document order.
    pub fn prev_id(&self) -> Option<&str> {
        let current = self.active_index()?;
        self.id_at(current.checked_sub(1)?)
    }

    #[must_use]
    /// Next section at the same depth under the same parent.
    pub fn next_sibling_id(&self) -> Option<&str> {
        let flat = self.outline.flatten();
        let current = self.active_index()?;
        let depth = flat[current].depth;

        for section in &flat[current + 1..] {
            if section.depth == depth {
                return Some(&section.id);
            }
            // Stop once we've climbed out of the parent
            if section.depth < depth {
                break;
            }
        }
        None
    }

    #[must_use]
    /// Previous section at the same depth under the same parent.
    pub fn prev_sibling_id(&self) -> Option<&str> {
        let flat = self.outline.flatten();
        let current = self.active_index()?;
        let depth = flat[current].depth;

        for section in flat[..current].iter().rev() {
            if section.depth == depth {
                return Some(&section.id);
            }
            if section.depth < depth {
                break;
            }
        }
        None
    }

    #[must_use]
    /// The section containing the active one.
    pub fn parent_id(&self) -> Option<&str> {
        let flat = self.outline.flatten();
        let current = self.active_index()?;
        let depth = flat[current].depth;

        flat[..current]
            .iter()
            .rev()
            .find(|section| section.depth < depth)
            .map(|section| section.id.as_str())
    }

    #[must_use]
    /// First section of the document.
    pub fn first_id(&self) -> &str {
        self.outline.first_id()
    }

    #[must_use]
    /// Last section of the document in flattened order.
    pub fn last_id(&self) -> Option<&str> {
        self.outline
            .flatten()
            .last()
            .map(|section| section.id.as_str())
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
