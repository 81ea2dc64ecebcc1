//! Mediation configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Mediation flow configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MediationConfig {
    /// Terms refused on top of the builtin list (comma-separated)
    pub extra_forbidden_keywords: Option<String>,

    /// YAML catalog replacing the builtin strategies and templates
    pub catalog_path: Option<PathBuf>,
}

impl MediationConfig {
    /// Get the extra forbidden keywords as a vector
    pub fn extra_forbidden_keywords_list(&self) -> Vec<String> {
        self.extra_forbidden_keywords
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate mediation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(ValidationError::CatalogNotFound(path.clone()));
            }
        }
        Ok(())
    }
}
