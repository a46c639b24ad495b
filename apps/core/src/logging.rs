//! Tracing subscriber setup.
//!
//! All output goes to stderr so that stdout stays reserved for command
//! responses.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LogFormat;
use crate::error::AppError;

pub const APP_NAME: &str = "hybridcare";

/// Build the `EnvFilter` for a directive string such as `info,hybridcare_core=debug`.
pub fn env_filter(directives: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(directives)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which happens
/// when several tests initialize logging in the same process.
pub fn init_tracing(format: LogFormat, directives: &str) -> Result<bool, AppError> {
    let filter = env_filter(directives)?;

    let installed = match format {
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok(),
    };

    Ok(installed)
}
