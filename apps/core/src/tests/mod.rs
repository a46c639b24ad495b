//! Test Module
//!
//! Cross-module test suite for the hybridcare analysis core.
//!
//! ## Test Categories
//! - `analysis_tests`: sentiment, distortion, escalation and mood properties
//! - `actor_tests`: completion actor against a mock HTTP server
//! - `integration_tests`: full request workflows through the command surface
//! - `config_tests`: environment-driven configuration

pub mod analysis_tests;
pub mod config_tests;
