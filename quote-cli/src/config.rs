//! TOML configuration for the estimator.
//!
//! Every section and every key is optional; an empty file yields the same
//! settings as running without a config file.
//!
//! ```toml
//! [estimate]
//! cap = 300000
//! maintenance_surcharge = 0.20
//!
//! [currency]
//! symbol = "₹"
//! grouping = "indian"      # or "western"
//!
//! [messaging]
//! base_url = "https://wa.me/"
//! phone_number = "919647457831"
//!
//! [catalog]
//! dir = "catalog"          # omit to use the built-in catalog
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use quote_core::messaging::{DEFAULT_CHAT_BASE_URL, DEFAULT_CONTACT_NUMBER};
use quote_core::{ChatLinkBuilder, CurrencyFormat, EstimateConfig, EstimateConfigError, MessagingError};
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [estimate] settings: {0}")]
    Estimate(#[from] EstimateConfigError),

    #[error("invalid [messaging] settings: {0}")]
    Messaging(#[from] MessagingError),

    #[error("invalid [logging] level '{level}': {message}")]
    LogLevel { level: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub estimate: EstimateConfig,
    pub currency: CurrencyFormat,
    pub messaging: MessagingConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagingConfig {
    pub base_url: String,
    pub phone_number: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            phone_number: DEFAULT_CONTACT_NUMBER.to_string(),
        }
    }
}

impl MessagingConfig {
    pub fn chat_link_builder(&self) -> Result<ChatLinkBuilder, MessagingError> {
        ChatLinkBuilder::new(&self.base_url, &self.phone_number)
    }
}

/// Where catalog CSV files come from. `None` selects the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates a TOML document.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimate.validate()?;
        self.messaging.chat_link_builder()?;
        EnvFilter::try_new(&self.logging.level).map_err(|e| ConfigError::LogLevel {
            level: self.logging.level.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::DigitGrouping;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.estimate, EstimateConfig::default());
        assert_eq!(config.currency.symbol, "₹");
        assert_eq!(config.messaging.phone_number, "919647457831");
        assert_eq!(config.catalog.dir, None);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = AppConfig::parse("").expect("empty config is valid");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
[estimate]
cap = 500000
maintenance_surcharge = 0.25

[currency]
symbol = "$"
grouping = "western"

[messaging]
base_url = "https://wa.me/"
phone_number = "+1 555 010 0199"

[catalog]
dir = "/etc/quote-estimator/catalog"

[logging]
level = "debug"
"#;

        let config = AppConfig::parse(toml).expect("valid config");

        assert_eq!(config.estimate.cap, dec!(500000));
        assert_eq!(config.estimate.maintenance_surcharge, dec!(0.25));
        assert_eq!(config.currency, CurrencyFormat::new("$", DigitGrouping::Western));
        assert_eq!(
            config.catalog.dir,
            Some(PathBuf::from("/etc/quote-estimator/catalog"))
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config
                .messaging
                .chat_link_builder()
                .expect("valid messaging settings")
                .phone_number(),
            "15550100199"
        );
    }

    #[test]
    fn test_parse_partial_section_keeps_other_defaults() {
        let config = AppConfig::parse("[estimate]\ncap = 100000\n").expect("valid config");

        assert_eq!(config.estimate.cap, dec!(100000));
        assert_eq!(config.estimate.maintenance_surcharge, dec!(0.20));
    }

    #[test]
    fn test_validation_rejects_zero_cap() {
        let result = AppConfig::parse("[estimate]\ncap = 0\n");

        assert!(matches!(
            result,
            Err(ConfigError::Estimate(EstimateConfigError::InvalidCap(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_empty_phone_number() {
        let result = AppConfig::parse("[messaging]\nphone_number = \"\"\n");

        assert!(matches!(
            result,
            Err(ConfigError::Messaging(MessagingError::EmptyPhoneNumber(_)))
        ));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = AppConfig::parse("[estimate]\nceiling = 1000\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_misspelled_surcharge_is_rejected() {
        let result = AppConfig::parse("[estimate]\nmaintenance_surchage = 0.5\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_currency_keys_are_rejected() {
        let result = AppConfig::parse("[currency]\nsymbol = \"$\"\nseparator = \",\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_grouping_is_rejected() {
        let result = AppConfig::parse("[currency]\ngrouping = \"roman\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let path = Path::new("/nonexistent/quote-estimator.toml");

        let result = AppConfig::load(path);

        match result {
            Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Read error, got {other:?}"),
        }
    }
}
