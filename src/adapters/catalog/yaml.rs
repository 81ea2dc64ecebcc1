//! YAML-backed template catalog.
//!
//! Loads a full replacement for the builtin texts. The document layout is
//! the serde form of the catalog:
//!
//! ```yaml
//! strategies:
//!   - name: Quiet Hours
//!     archetype: collaborative
//!     description: Agree on quiet hours together.
//!     steps: ["Propose hours", "Review weekly"]
//!     timeline: 2 weeks
//!   # ... one entry per archetype
//! message_templates:
//!   collaborative:
//!     - tone: soft
//!       body: "Hi {counterparty}, about {trigger}..."
//! response_pool:
//!   facts: [...]
//!   motives: [...]
//!   past_attempts: [...]
//!   ideal_fix: ...
//!   misunderstandings: ...
//!   impact: ...
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::domain::mediation::{Archetype, ResponsePool, Strategy};
use crate::domain::messaging::MessageTemplate;
use crate::ports::TemplateCatalog;

/// Template catalog read from a YAML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YamlCatalog {
    strategies: Vec<Strategy>,
    message_templates: BTreeMap<Archetype, Vec<MessageTemplate>>,
    response_pool: ResponsePool,
}

impl YamlCatalog {
    /// Parses and validates a catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: YamlCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Copies another catalog, typically to export the builtin texts.
    pub fn from_catalog(catalog: &dyn TemplateCatalog) -> Self {
        Self {
            strategies: catalog.strategies().to_vec(),
            message_templates: Archetype::all()
                .iter()
                .map(|archetype| (*archetype, catalog.message_templates(*archetype).to_vec()))
                .collect(),
            response_pool: catalog.response_pool().clone(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks the catalog can serve every flow operation.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.strategies.len() != Archetype::all().len() {
            return Err(CatalogError::invalid(format!(
                "expected {} strategies, found {}",
                Archetype::all().len(),
                self.strategies.len()
            )));
        }

        let archetypes: BTreeSet<Archetype> =
            self.strategies.iter().map(|s| s.archetype).collect();
        if archetypes.len() != self.strategies.len() {
            return Err(CatalogError::invalid(
                "strategies must have distinct archetypes",
            ));
        }

        for strategy in &self.strategies {
            if strategy.name.trim().is_empty() {
                return Err(CatalogError::invalid("strategy name is empty"));
            }
            if strategy.steps.is_empty() {
                return Err(CatalogError::invalid(format!(
                    "strategy '{}' has no steps",
                    strategy.name
                )));
            }
        }

        for archetype in Archetype::all() {
            let has_templates = self
                .message_templates
                .get(archetype)
                .is_some_and(|templates| !templates.is_empty());
            if !has_templates {
                return Err(CatalogError::invalid(format!(
                    "no message templates for {}",
                    archetype
                )));
            }
        }

        self.response_pool.validate()?;
        Ok(())
    }
}

impl TemplateCatalog for YamlCatalog {
    fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    fn message_templates(&self, archetype: Archetype) -> &[MessageTemplate] {
        self.message_templates
            .get(&archetype)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn response_pool(&self) -> &ResponsePool {
        &self.response_pool
    }
}
