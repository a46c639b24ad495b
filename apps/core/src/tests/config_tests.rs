//! Configuration Tests
//!
//! Environment parsing, run under `temp_env` so variables never leak between
//! tests.

use crate::config::{AppConfig, LogFormat, DEFAULT_COMPLETION_MODEL};
use crate::error::AppError;
use std::time::Duration;

const VARS: [&str; 8] = [
    "OPENAI_API_KEY",
    "COMPLETION_BASE_URL",
    "COMPLETION_MODEL",
    "COMPLETION_TIMEOUT_SECS",
    "COMPLETION_MAX_TOKENS",
    "COMPLETION_TEMPERATURE",
    "LOG_FORMAT",
    "RUST_LOG",
];

/// Run `f` with only the given variables set.
fn with_env<F, R>(set: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let vars: Vec<(&str, Option<&str>)> = VARS
        .iter()
        .map(|key| {
            let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f)
}

#[test]
fn test_defaults_without_environment() {
    let config = with_env(&[], AppConfig::from_env).unwrap();

    assert!(!config.completion.is_enabled());
    assert_eq!(config.completion.model, DEFAULT_COMPLETION_MODEL);
    assert_eq!(config.completion.timeout, Duration::from_secs(30));
    assert_eq!(config.completion.max_tokens, 250);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.log_filter, "info");
    assert_eq!(
        config.completion.endpoint(),
        "https://api.openai.com/v1/completions"
    );
}

#[test]
fn test_full_environment() {
    let config = with_env(
        &[
            ("OPENAI_API_KEY", "sk-test"),
            ("COMPLETION_BASE_URL", "http://localhost:8080/"),
            ("COMPLETION_MODEL", "gpt-3.5-turbo-instruct"),
            ("COMPLETION_TIMEOUT_SECS", "5"),
            ("COMPLETION_MAX_TOKENS", "64"),
            ("COMPLETION_TEMPERATURE", "0.2"),
            ("LOG_FORMAT", "json"),
            ("RUST_LOG", "debug"),
        ],
        AppConfig::from_env,
    )
    .unwrap();

    assert!(config.completion.is_enabled());
    assert_eq!(config.completion.endpoint(), "http://localhost:8080/v1/completions");
    assert_eq!(config.completion.model, "gpt-3.5-turbo-instruct");
    assert_eq!(config.completion.timeout, Duration::from_secs(5));
    assert_eq!(config.completion.max_tokens, 64);
    assert_eq!(config.completion.temperature, 0.2);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_blank_api_key_disables_completion() {
    let config = with_env(&[("OPENAI_API_KEY", "   ")], AppConfig::from_env).unwrap();
    assert!(!config.completion.is_enabled());
}

#[test]
fn test_api_key_is_redacted_in_debug() {
    let config = with_env(&[("OPENAI_API_KEY", "sk-secret")], AppConfig::from_env).unwrap();
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("sk-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_invalid_values_are_config_errors() {
    let cases: [(&str, &str); 6] = [
        ("COMPLETION_BASE_URL", "not a url"),
        ("COMPLETION_BASE_URL", "ftp://example.com"),
        ("COMPLETION_TIMEOUT_SECS", "0"),
        ("COMPLETION_MAX_TOKENS", "lots"),
        ("COMPLETION_TEMPERATURE", "3.5"),
        ("LOG_FORMAT", "xml"),
    ];

    for (key, value) in cases {
        let result = with_env(&[(key, value)], AppConfig::from_env);
        assert!(
            matches!(result, Err(AppError::Config(_))),
            "{}={} should be rejected, got {:?}",
            key,
            value,
            result
        );
    }
}
