// Hybridcare CLI Entry Point
// Reads one JSON request from a file argument or stdin and prints the response

use anyhow::Context;
use clap::Parser;
use hybridcare_core::cli::Cli;
use hybridcare_core::commands::{handle_json, read_input};
use hybridcare_core::logging::init_tracing;
use hybridcare_core::{AppConfig, TherapyAnalyzer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.log_format, &config.log_filter).context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        completion = config.completion.is_enabled(),
        "Hybridcare analysis core starting"
    );

    let analyzer = TherapyAnalyzer::from_config(&config);

    let raw = read_input(cli.request.as_deref()).context("Failed to read request")?;

    let response = handle_json(&analyzer, &raw).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
