//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEDIATOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use conflict_mediator::application::MediationFlow;
//! use conflict_mediator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init().expect("Failed to install logger");
//!
//! let flow = MediationFlow::from_config(&config.mediation).expect("Failed to build flow");
//! ```

mod error;
mod logging;
mod mediation;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use mediation::MediationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mediation configuration (keyword screen, catalog)
    #[serde(default)]
    pub mediation: MediationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEDIATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEDIATOR__LOGGING__FILTER=debug` -> `logging.filter = debug`
    /// - `MEDIATOR__MEDIATION__EXTRA_FORBIDDEN_KEYWORDS=stalk,blackmail`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDIATOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.mediation.validate()?;
        Ok(())
    }
}
