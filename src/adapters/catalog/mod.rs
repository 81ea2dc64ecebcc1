//! Template catalog adapters.
//!
//! - `BuiltinCatalog` - Stock strategies, message templates and response pool
//! - `YamlCatalog` - Full catalog loaded from a YAML document

mod builtin;
mod error;
mod yaml;

pub use builtin::BuiltinCatalog;
pub use error::CatalogError;
pub use yaml::YamlCatalog;
