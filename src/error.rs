//! Error type shared across the crate.
//!
//! Navigation itself never fails: a missing anchor is a silent no-op. The errors here cover
//! building the outline, reading configuration and parsing documents.

use std::io;
use thiserror::Error;

/// Failures that can occur while loading a document and building its outline.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a document or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The document could not be parsed by tree-sitter.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Two sections in the outline share the same id.
    #[error("duplicate section id: {0}")]
    DuplicateSectionId(String),

    /// The outline has no sections, so there is nothing to make active.
    #[error("outline contains no sections")]
    EmptyOutline,
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
