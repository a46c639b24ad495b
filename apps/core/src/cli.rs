//! Command-line arguments of the `hybridcare` binary.

use clap::Parser;
use std::path::PathBuf;

/// Run one hybridcare analysis request and print the JSON response.
#[derive(Parser, Debug)]
#[command(name = "hybridcare", author, version, about, long_about = None)]
pub struct Cli {
    /// Request file in JSON; read from stdin when absent
    pub request: Option<PathBuf>,
}
