//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::{ConfigError, ValidationError};

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Validate the filter directive
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filter.trim().is_empty() {
            return Err(ValidationError::EmptyLogFilter);
        }
        EnvFilter::try_new(&self.filter)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        Ok(())
    }

    /// Filter to install: `RUST_LOG` if set, otherwise the configured one
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoggingFailed` if a global subscriber is
    /// already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let builder = tracing_subscriber::fmt().with_env_filter(self.env_filter()?);

        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        result.map_err(|e| ConfigError::LoggingFailed(e.to_string()))
    }
}
