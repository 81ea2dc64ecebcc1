//! Adapters - Implementations of port interfaces.
//!
//! - `content_screen` - Keyword content screen
//! - `catalog` - Builtin and YAML template catalogs

pub mod catalog;
pub mod content_screen;

pub use catalog::{BuiltinCatalog, CatalogError, YamlCatalog};
pub use content_screen::{KeywordContentScreen, DEFAULT_FORBIDDEN_KEYWORDS};
