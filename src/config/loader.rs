//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section and
//! field has a default, so a missing or partial file still yields a
//! usable configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::coinmarketcap::{CoinMarketCapConfig, DEFAULT_BASE_URL};
use crate::domain::screen::{
    ScreenCriteria, DEFAULT_MAX_AGE_HOURS, DEFAULT_MIN_LIQUIDITY, DEFAULT_MIN_MARKET_CAP,
    DEFAULT_MIN_VOLUME, DEFAULT_QUOTE_CURRENCY,
};
use crate::ports::report::DEFAULT_HIGHLIGHT_HOURS;

/// Environment variable consulted when `api.api_key` is empty
pub const API_KEY_ENV: &str = "CMC_PRO_API_KEY";

/// Default number of listings per fetch
pub const DEFAULT_PAGE_LIMIT: u32 = 5000;

/// Default export file name
pub const DEFAULT_EXPORT_PATH: &str = "filtered_crypto_data.csv";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub screen: ScreenSection,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Market data API section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// API root URL
    pub base_url: String,
    /// Static API key (falls back to CMC_PRO_API_KEY)
    pub api_key: Option<String>,
    /// Quote currency
    pub convert: String,
    /// HTTP timeout in seconds (client default when unset)
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            convert: DEFAULT_QUOTE_CURRENCY.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiSection {
    /// Get API key with environment variable fallback
    /// Checks CMC_PRO_API_KEY env var if config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.trim().is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Screen thresholds section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenSection {
    /// Listings requested per fetch
    pub page_limit: u32,
    /// Maximum listing age in hours (4320 = 180 days)
    pub max_age_hours: f64,
    pub min_market_cap: f64,
    pub min_volume: f64,
    /// Liquidity is approximated by 24h volume
    pub min_liquidity: f64,
}

impl Default for ScreenSection {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            min_volume: DEFAULT_MIN_VOLUME,
            min_liquidity: DEFAULT_MIN_LIQUIDITY,
        }
    }
}

/// Report section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Coins listed within this many hours are highlighted
    pub highlight_hours: f64,
    /// CSV export destination (overwritten on each export)
    pub export_path: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            highlight_hours: DEFAULT_HIGHLIGHT_HOURS,
            export_path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }
}

impl ReportSection {
    /// Export path with `~` expanded
    pub fn expanded_export_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.export_path).to_string())
    }
}

/// Logging section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
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
    #[error("No API key: set api.api_key or the {} environment variable", API_KEY_ENV)]
    MissingApiKey,
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load from a file when one exists, defaults otherwise.
///
/// An explicitly requested path must exist; the default path is optional.
pub fn load_config_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !explicit && !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        let config = Config::default();
        config.validate()?;
        return Ok(config);
    }
    load_config(path)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.api.convert.is_empty() {
            return Err(ConfigError::ValidationError(
                "convert cannot be empty".to_string(),
            ));
        }

        if self.screen.page_limit == 0 {
            return Err(ConfigError::ValidationError(format!(
                "page_limit must be > 0, got {}",
                self.screen.page_limit
            )));
        }

        self.screen_criteria()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if !self.report.highlight_hours.is_finite() || self.report.highlight_hours < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "highlight_hours must be >= 0, got {}",
                self.report.highlight_hours
            )));
        }

        if self.report.export_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "export_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Screen thresholds for the domain layer
    pub fn screen_criteria(&self) -> ScreenCriteria {
        ScreenCriteria {
            max_age_hours: self.screen.max_age_hours,
            min_market_cap: self.screen.min_market_cap,
            min_volume: self.screen.min_volume,
            min_liquidity: self.screen.min_liquidity,
            quote_currency: self.api.convert.clone(),
        }
    }

    /// Client settings, resolving the API key
    pub fn client_config(&self) -> Result<CoinMarketCapConfig, ConfigError> {
        let api_key = self.api.get_api_key().ok_or(ConfigError::MissingApiKey)?;

        Ok(CoinMarketCapConfig {
            base_url: self.api.base_url.clone(),
            api_key,
            convert: self.api.convert.clone(),
            timeout: self.api.timeout_secs.map(Duration::from_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[api]
base_url = "https://sandbox-api.coinmarketcap.com"
api_key = "test-key"
convert = "USD"
timeout_secs = 20

[screen]
page_limit = 200
max_age_hours = 720.0
min_market_cap = 1000000.0
min_volume = 50000.0
min_liquidity = 20000.0

[report]
highlight_hours = 24.0
export_path = "out/newcoins.csv"

[logging]
level = "info"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://sandbox-api.coinmarketcap.com");
        assert_eq!(config.api.timeout_secs, Some(20));
        assert_eq!(config.screen.page_limit, 200);
        assert_eq!(config.screen.max_age_hours, 720.0);
        assert_eq!(config.report.highlight_hours, 24.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "https://pro-api.coinmarketcap.com");
        assert_eq!(config.api.convert, "USD");
        assert_eq!(config.screen.page_limit, 5000);
        assert_eq!(config.screen.max_age_hours, 4320.0);
        assert_eq!(config.screen.min_market_cap, 300_000.0);
        assert_eq!(config.screen.min_volume, 30_000.0);
        assert_eq!(config.screen.min_liquidity, 10_000.0);
        assert_eq!(config.report.highlight_hours, 72.0);
        assert_eq!(config.report.export_path, "filtered_crypto_data.csv");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let file = write_config("[screen]\nmin_volume = 99.0\n");

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.screen.min_volume, 99.0);
        assert_eq!(config.screen.min_market_cap, 300_000.0);
        assert_eq!(config.report.highlight_hours, 72.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_missing_default_path_uses_defaults() {
        let config = load_config_or_default("/nonexistent/path/config.toml", false).unwrap();
        assert_eq!(config.screen.page_limit, DEFAULT_PAGE_LIMIT);

        let result = load_config_or_default("/nonexistent/path/config.toml", true);
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[screen\npage_limit = ");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let file = write_config("[screen]\npage_limit = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let file = write_config("[screen]\nmin_market_cap = -5.0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_negative_highlight_rejected() {
        let file = write_config("[report]\nhighlight_hours = -1.0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_screen_criteria_conversion() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        let criteria = config.screen_criteria();
        assert_eq!(criteria.max_age_hours, 720.0);
        assert_eq!(criteria.min_market_cap, 1_000_000.0);
        assert_eq!(criteria.min_volume, 50_000.0);
        assert_eq!(criteria.min_liquidity, 20_000.0);
        assert_eq!(criteria.quote_currency, "USD");
    }

    #[test]
    fn test_client_config_from_file_key() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        let client = config.client_config().unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_api_key_prefers_config_value() {
        let api = ApiSection {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(api.get_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_expanded_export_path() {
        let report = ReportSection::default();
        assert_eq!(report.expanded_export_path(), PathBuf::from("filtered_crypto_data.csv"));
    }
}
