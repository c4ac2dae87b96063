//! slamdoc: a terminal reader for a single long report with a scroll-synced table of contents.
//!
//! The document is parsed with tree-sitter, laid out into terminal lines, and shown next to a
//! sidebar listing its sections. Scrolling the document updates which section is highlighted;
//! choosing a section smooth-scrolls the document to it.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod layout;
pub mod math;
pub mod navigator;
pub mod outline;
pub mod section;
pub mod ui;
pub mod viewport;
