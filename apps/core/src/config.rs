//! Environment-driven configuration.
//!
//! Values are read from the process environment after loading an optional
//! `.env` file. Missing variables fall back to defaults; malformed ones are
//! reported as [`AppError::Config`].

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_COMPLETION_MODEL: &str = "text-davinci-003";
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_COMPLETION_MAX_TOKENS: u32 = 250;
pub const DEFAULT_COMPLETION_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr
    Pretty,
    /// Bunyan-style JSON records on stderr
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

/// Settings for the text-completion service used for reframing suggestions.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer credential. `None` disables the service entirely.
    pub api_key: Option<String>,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL of the completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            // Constant input, cannot fail
            base_url: Url::parse(DEFAULT_COMPLETION_BASE_URL)
                .expect("Invalid default completion URL"),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
            max_tokens: DEFAULT_COMPLETION_MAX_TOKENS,
            temperature: DEFAULT_COMPLETION_TEMPERATURE,
        }
    }
}

// The API key must never reach the logs.
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub completion: CompletionConfig,
    pub log_format: LogFormat,
    /// `EnvFilter` directive string
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            log_format: LogFormat::Pretty,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read the environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from the current process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = match env::var("COMPLETION_BASE_URL") {
            Ok(raw) => Url::parse(raw.trim())?,
            Err(_) => Url::parse(DEFAULT_COMPLETION_BASE_URL)?,
        };
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "COMPLETION_BASE_URL must be http(s), got {}",
                base_url.scheme()
            )));
        }

        let model = env::var("COMPLETION_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string());

        let timeout_secs: u64 = parse_var("COMPLETION_TIMEOUT_SECS", DEFAULT_COMPLETION_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "COMPLETION_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let max_tokens: u32 = parse_var("COMPLETION_MAX_TOKENS", DEFAULT_COMPLETION_MAX_TOKENS)?;

        let temperature: f32 = parse_var("COMPLETION_TEMPERATURE", DEFAULT_COMPLETION_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AppError::Config(format!(
                "COMPLETION_TEMPERATURE must be between 0.0 and 2.0, got {}",
                temperature
            )));
        }

        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => LogFormat::Pretty,
        };

        let log_filter = env::var("RUST_LOG")
            .ok()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            completion: CompletionConfig {
                api_key,
                base_url,
                model,
                timeout: Duration::from_secs(timeout_secs),
                max_tokens,
                temperature,
            },
            log_format,
            log_filter,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}='{}': {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}
