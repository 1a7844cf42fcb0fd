//! Environment-driven settings.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file.

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::pricing::{PricingConfig, PricingError, UnknownServicePolicy};

pub const LOG_LEVEL_VAR: &str = "QUOTE_LOG_LEVEL";
pub const PRICING_FILE_VAR: &str = "QUOTE_PRICING_FILE";
pub const UNKNOWN_SERVICE_VAR: &str = "QUOTE_UNKNOWN_SERVICE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("QUOTE_UNKNOWN_SERVICE must be 'fallback' or 'reject', got '{value}'")]
    InvalidPolicy { value: String },

    #[error("pricing tables could not be loaded: {0}")]
    Pricing(#[from] PricingError),
}

/// Top-level configuration for the quote tools
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub pricing_file: Option<PathBuf>,
    pub unknown_service: UnknownServicePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pricing_file: None,
            unknown_service: UnknownServicePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read settings from the current environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string());

        let pricing_file = env::var(PRICING_FILE_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let unknown_service = match env::var(UNKNOWN_SERVICE_VAR) {
            Ok(value) => UnknownServicePolicy::parse(&value)
                .ok_or(ConfigError::InvalidPolicy { value })?,
            Err(_) => UnknownServicePolicy::default(),
        };

        Ok(Self {
            log_level,
            pricing_file,
            unknown_service,
        })
    }

    /// Pricing tables: the configured file if any, else the defaults.
    ///
    /// The environment's unknown-service policy wins over the file's, so
    /// the tables are checked again under that policy.
    pub fn pricing(&self) -> Result<PricingConfig, ConfigError> {
        let config = match &self.pricing_file {
            Some(path) => {
                info!("Loading pricing tables from {}", path.display());
                PricingConfig::from_file(path)?
            }
            None => PricingConfig::default(),
        };
        let config = config.with_policy(self.unknown_service);
        config.validate()?;
        Ok(config)
    }
}
