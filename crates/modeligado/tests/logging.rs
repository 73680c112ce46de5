//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations, and that parsing and generation run
//! with a subscriber installed.

use modeligado::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use modeligado::{convert, example_diagram};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "MODELIGADO_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "MODELIGADO_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest must
    // fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_with_trace_logging() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let sources = convert(example_diagram(), Some("app")).unwrap();
    assert_eq!(sources.len(), 7);

    let err = convert("Pessoa\n---\n", None).unwrap_err();
    assert_eq!(err.line(), 2);
}
