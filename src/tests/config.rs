use super::Config;
use crate::error::Error;
use crate::navigator::DEFAULT_LOOKAHEAD_MARGIN;
use crate::viewport::DEFAULT_SMOOTHING;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let cfg = Config::defaults().unwrap();

    assert_eq!(cfg.wrap_width, 100);
    assert_eq!(cfg.sidebar_width, 34);
    assert_eq!(cfg.lookahead_margin, DEFAULT_LOOKAHEAD_MARGIN);
    assert_eq!(cfg.scroll_step, 1);
    assert_eq!(cfg.scroll_smoothing, DEFAULT_SMOOTHING);
    assert_eq!(cfg.tick_ms, 16);
    assert!(cfg.process_escapes);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "wrap_width = 72\nlookahead_margin = 3").unwrap();

    let cfg = Config::load(Some(file.path())).unwrap();

    assert_eq!(cfg.wrap_width, 72);
    assert_eq!(cfg.lookahead_margin, 3);
    assert_eq!(cfg.sidebar_width, 34);
}

#[test]
fn test_escape_processing_flows_into_math_options() {
    let cfg = Config::from_toml("process_escapes = false").unwrap();

    assert!(!cfg.math_options().process_escapes);
    assert_eq!(cfg.math_options().inline.0, "$");
}

#[test]
fn test_malformed_file_is_config_error() {
    let result = Config::from_toml("wrap_width = \"wide\"");

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let result = Config::load(Some(std::path::Path::new("/nonexistent/slamdoc.toml")));

    assert!(matches!(result, Err(Error::Io(_))));
}
