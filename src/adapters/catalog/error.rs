//! Catalog loading errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::mediation::MediationError;

/// Errors raised while loading or checking a template catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::Invalid(message.into())
    }
}

impl From<MediationError> for CatalogError {
    fn from(err: MediationError) -> Self {
        match err {
            MediationError::Catalog(message) => CatalogError::Invalid(message),
            other => CatalogError::Invalid(other.to_string()),
        }
    }
}
