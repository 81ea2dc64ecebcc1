//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ContentScreen` - Refuses descriptions that match the content policy
//! - `TemplateCatalog` - Strategies, message templates and the response pool

mod content_screen;
mod template_catalog;

pub use content_screen::ContentScreen;
pub use template_catalog::TemplateCatalog;
