//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every field has a
//! default, so an empty file (or no file at all) is a valid configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::domain::market::{DriftParams, DEFAULT_DRIFT_MAX_INCREASE, DEFAULT_DRIFT_PROBABILITY};
use crate::domain::mock_data::DEFAULT_MOCK_TOKEN_COUNT;
use crate::domain::trade::DEFAULT_FEED_CAPACITY;

/// Log levels accepted by `[logging] level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub wallet: WalletSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Simulation timing and randomness section
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSection {
    /// Seconds between collection-wide drift ticks
    #[serde(default = "default_drift_interval_secs")]
    pub drift_interval_secs: u64,
    /// Seconds between synthetic trade-feed ticks on a detail session
    #[serde(default = "default_feed_interval_secs")]
    pub feed_interval_secs: u64,
    /// Chance (0-1) that a token drifts on a tick
    #[serde(default = "default_drift_probability")]
    pub drift_probability: f64,
    /// Exclusive upper bound of a single drift increase
    #[serde(default = "default_drift_max_increase")]
    pub drift_max_increase: f64,
    /// Chance (0-1) that a feed tick fabricates a trade
    #[serde(default = "default_feed_probability")]
    pub feed_probability: f64,
    /// Trades kept in a detail session's recent-trades list
    #[serde(default = "default_recent_trades_limit")]
    pub recent_trades_limit: usize,
    /// Tokens on a freshly seeded board
    #[serde(default = "default_mock_token_count")]
    pub mock_token_count: usize,
    /// Fixed RNG seed for reproducible runs (random if absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_drift_interval_secs() -> u64 {
    3
}
fn default_feed_interval_secs() -> u64 {
    2
}
fn default_drift_probability() -> f64 {
    DEFAULT_DRIFT_PROBABILITY
}
fn default_drift_max_increase() -> f64 {
    DEFAULT_DRIFT_MAX_INCREASE
}
fn default_feed_probability() -> f64 {
    0.3
}
fn default_recent_trades_limit() -> usize {
    DEFAULT_FEED_CAPACITY
}
fn default_mock_token_count() -> usize {
    DEFAULT_MOCK_TOKEN_COUNT
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            drift_interval_secs: default_drift_interval_secs(),
            feed_interval_secs: default_feed_interval_secs(),
            drift_probability: default_drift_probability(),
            drift_max_increase: default_drift_max_increase(),
            feed_probability: default_feed_probability(),
            recent_trades_limit: default_recent_trades_limit(),
            mock_token_count: default_mock_token_count(),
            seed: None,
        }
    }
}

impl SimulationSection {
    pub fn drift_interval(&self) -> Duration {
        Duration::from_secs(self.drift_interval_secs)
    }

    pub fn feed_interval(&self) -> Duration {
        Duration::from_secs(self.feed_interval_secs)
    }

    pub fn drift_params(&self) -> DriftParams {
        DriftParams {
            probability: self.drift_probability,
            max_increase: self.drift_max_increase,
        }
    }
}

/// Gemini text-generation API section
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSection {
    /// REST API base URL
    #[serde(default = "default_gemini_api_base_url")]
    pub api_base_url: String,
    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// API key (falls back to GEMINI_API_KEY, then API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of attempts before giving up
    #[serde(default = "default_gemini_max_retries")]
    pub max_retries: u32,
}

fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_gemini_timeout_secs() -> u64 {
    30
}
fn default_gemini_max_retries() -> u32 {
    3
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            api_key: None,
            timeout_secs: default_gemini_timeout_secs(),
            max_retries: default_gemini_max_retries(),
        }
    }
}

impl GeminiSection {
    /// Get API key with environment variable fallback
    /// Checks GEMINI_API_KEY, then API_KEY, if config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
    }
}

/// Wallet identity section
#[derive(Debug, Clone, Deserialize)]
pub struct WalletSection {
    /// Fixed creator address (random if absent)
    #[serde(default)]
    pub address: Option<String>,
    /// Whether eager connection on startup succeeds
    #[serde(default = "default_wallet_trusted")]
    pub trusted: bool,
}

fn default_wallet_trusted() -> bool {
    true
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            address: None,
            trusted: default_wallet_trusted(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration if the file exists, otherwise use defaults
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        Ok(Config::default())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be 0-1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;

        if sim.drift_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "drift_interval_secs must be > 0".to_string(),
            ));
        }

        if sim.feed_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "feed_interval_secs must be > 0".to_string(),
            ));
        }

        check_probability("drift_probability", sim.drift_probability)?;
        check_probability("feed_probability", sim.feed_probability)?;

        if !sim.drift_max_increase.is_finite() || sim.drift_max_increase < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "drift_max_increase must be >= 0, got {}",
                sim.drift_max_increase
            )));
        }

        if sim.recent_trades_limit == 0 {
            return Err(ConfigError::ValidationError(
                "recent_trades_limit must be > 0".to_string(),
            ));
        }

        // Validate Gemini
        if self.gemini.api_base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini api_base_url cannot be empty".to_string(),
            ));
        }

        if self.gemini.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini model cannot be empty".to_string(),
            ));
        }

        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gemini timeout_secs must be > 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn create_valid_config() -> String {
        r#"
[simulation]
drift_interval_secs = 5
feed_interval_secs = 1
drift_probability = 0.5
drift_max_increase = 250.0
feed_probability = 0.2
recent_trades_limit = 20
mock_token_count = 4
seed = 42

[gemini]
api_base_url = "https://generativelanguage.googleapis.com/v1beta"
model = "gemini-2.5-flash"
timeout_secs = 10
max_retries = 2

[wallet]
address = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
trusted = false

[logging]
level = "debug"
"#
        .to_string()
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.simulation.drift_interval(), Duration::from_secs(5));
        assert_eq!(config.simulation.recent_trades_limit, 20);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.drift_params().max_increase, 250.0);
        assert_eq!(config.gemini.max_retries, 2);
        assert!(!config.wallet.trusted);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.simulation.drift_interval_secs, 3);
        assert_eq!(config.simulation.feed_interval_secs, 2);
        assert_eq!(config.simulation.drift_probability, 0.3);
        assert_eq!(config.simulation.drift_max_increase, 500.0);
        assert_eq!(config.simulation.recent_trades_limit, 10);
        assert_eq!(config.simulation.mock_token_count, 12);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.wallet.trusted);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));

        let config = load_config_or_default("/nonexistent/path/config.toml").unwrap();
        assert_eq!(config.simulation.drift_interval_secs, 3);
    }

    #[test]
    fn test_invalid_probability() {
        let file = write_config("[simulation]\ndrift_probability = 1.5\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_interval() {
        let file = write_config("[simulation]\nfeed_interval_secs = 0\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let file = write_config("[logging]\nlevel = \"loud\"\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[simulation\n");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let section = GeminiSection {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(section.get_api_key(), Some("from-config".to_string()));
    }
}
