//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

use crate::adapters::catalog::CatalogError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Catalog could not be loaded: {0}")]
    CatalogFailed(#[from] CatalogError),

    #[error("Logging initialization failed: {0}")]
    LoggingFailed(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Log filter cannot be empty")]
    EmptyLogFilter,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),

    #[error("Catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),
}
