//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Gemini: text-generation API client for coin ideas and roasts
//! - CLI: Command-line interface definitions

pub mod gemini;
pub mod cli;

pub use gemini::GeminiClient;
pub use cli::CliApp;
