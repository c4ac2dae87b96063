//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a slamdoc.toml (or the file given with `--config`), and if
//! present we load settings from there. This provides wrapping width, sidebar width, scroll
//! behaviour and math escape handling.

use crate::error::{Error, Result};
use crate::math::MathOptions;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "slamdoc.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from slamdoc.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width for wrapping the document body.
    pub wrap_width: usize,
    #[facet(default = 34)]
    /// Columns given to the table of contents.
    pub sidebar_width: u16,
    #[facet(default = 1)]
    /// Lines below the top of the pane within which a heading counts as reached.
    pub lookahead_margin: usize,
    #[facet(default = 1)]
    /// Lines moved per scroll key press or wheel notch.
    pub scroll_step: usize,
    #[facet(default = 4)]
    /// Divisor for each smooth-scroll step; 1 jumps instantly.
    pub scroll_smoothing: usize,
    #[facet(default = 16)]
    /// Milliseconds between animation frames.
    pub tick_ms: u64,
    #[facet(default = true)]
    /// Treat `\$` as a literal dollar sign in the document body.
    pub process_escapes: bool,
}

impl Config {
    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Configuration with every setting at its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the defaults cannot be materialised.
    pub fn defaults() -> Result<Self> {
        Self::from_toml("")
    }

    /// Load configuration from `path`, or from slamdoc.toml if present.
    ///
    /// An explicitly given file must exist; the implicit slamdoc.toml is optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an explicit file cannot be read and [`Error::Config`] if any
    /// file found is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => Some(fs::read_to_string(path)?),
            None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
        };

        match contents {
            Some(contents) => Self::from_toml(&contents),
            None => Self::defaults(),
        }
    }

    #[must_use]
    /// Math delimiter settings derived from this configuration.
    pub fn math_options(&self) -> MathOptions {
        MathOptions {
            process_escapes: self.process_escapes,
            ..MathOptions::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
