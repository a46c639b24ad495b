// Hybridcare analysis core
// Rule-based text and mood analysis for the hybrid care platform

pub mod actors;
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod models;

pub use analysis::TherapyAnalyzer;
pub use config::AppConfig;
pub use error::AppError;

#[cfg(test)]
mod tests;
