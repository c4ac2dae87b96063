//! Section tree for the document's table of contents.
//!
//! A section is a navigable division of the document, typically corresponding to a heading.
//! Sections nest to arbitrary depth and declaration order is document order. The tree is
//! wrapped in an [`Outline`] once it has been checked for globally unique ids, after which it
//! is never mutated.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Node in the navigation tree, optionally containing subsections.
pub struct Section {
    /// Stable identifier used both as the anchor key and as a map key.
    pub id: String,
    /// Display label shown in the sidebar.
    pub title: String,
    /// Ordered subsections; empty for leaves.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Section>,
}

impl Section {
    #[must_use]
    /// Leaf section with no children.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    /// Section with the given subsections, in document order.
    pub fn with_children(
        id: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Section>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One entry of the depth-first flattening of an outline.
pub struct FlatSection {
    /// Identifier of the section.
    pub id: String,
    /// Display label of the section.
    pub title: String,
    /// Nesting depth (0 for top-level sections).
    pub depth: usize,
}

#[derive(Clone, Debug)]
/// Validated, immutable table of contents.
pub struct Outline {
    roots: Vec<Section>,
    flat: Vec<FlatSection>,
}

impl Outline {
    /// Validate the tree and precompute its flattening.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOutline`] when there are no sections and
    /// [`Error::DuplicateSectionId`] when any id occurs twice anywhere in the tree.
    pub fn new(roots: Vec<Section>) -> Result<Self> {
        if roots.is_empty() {
            return Err(Error::EmptyOutline);
        }

        let flat = flatten(&roots);
        let mut seen = HashSet::new();
        for entry in &flat {
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::DuplicateSectionId(entry.id.clone()));
            }
        }

        Ok(Self { roots, flat })
    }

    #[must_use]
    /// Top-level sections in document order.
    pub fn roots(&self) -> &[Section] {
        &self.roots
    }

    #[must_use]
    /// Every section, parent before children, in declaration order.
    pub fn flatten(&self) -> &[FlatSection] {
        &self.flat
    }

    #[must_use]
    /// Id of the first top-level section, the initial active section.
    pub fn first_id(&self) -> &str {
        // Non-empty by construction.
        &self.roots[0].id
    }

    #[must_use]
    /// Whether any section in the tree has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    /// Index of the section in the flattened order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.flat.iter().position(|entry| entry.id == id)
    }

    #[must_use]
    /// Look up a section anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&Section> {
        fn walk<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
            sections.iter().find_map(|section| {
                if section.id == id {
                    Some(section)
                } else {
                    walk(&section.children, id)
                }
            })
        }
        walk(&self.roots, id)
    }

    #[must_use]
    /// Chain of sections from the top level down to `id`, inclusive.
    ///
    /// Empty when the id is not in the outline.
    pub fn path_to(&self, id: &str) -> Vec<&Section> {
        fn walk<'a>(sections: &'a [Section], id: &str, path: &mut Vec<&'a Section>) -> bool {
            for section in sections {
                path.push(section);
                if section.id == id || walk(&section.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.roots, id, &mut path);
        path
    }
}

#[must_use]
/// Depth-first, pre-order flattening of a section tree.
///
/// A parent is immediately followed by its children, before its next sibling.
pub fn flatten(sections: &[Section]) -> Vec<FlatSection> {
    fn walk(sections: &[Section], depth: usize, out: &mut Vec<FlatSection>) {
        for section in sections {
            out.push(FlatSection {
                id: section.id.clone(),
                title: section.title.clone(),
                depth,
            });
            walk(&section.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(sections, 0, &mut out);
    out
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
