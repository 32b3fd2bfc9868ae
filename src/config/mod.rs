//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, GeminiSection, LoggingSection, SimulationSection, WalletSection,
    load_config, load_config_or_default,
};
