//! Template Catalog Port - strategy and message template source.
//!
//! The catalog supplies the three resolution strategies, the message
//! templates for each archetype and the pool used to simulate the
//! counterparty. The builtin adapter carries the stock texts; the YAML
//! adapter loads replacements from disk.

use crate::domain::mediation::{Archetype, ResponsePool, Strategy};
use crate::domain::messaging::MessageTemplate;

/// Port for reading mediation templates.
///
/// # Contract
///
/// Implementations must:
/// - Return exactly three strategies with distinct archetypes, in display order
/// - Return at least one message template for every archetype
/// - Return a response pool that passes `ResponsePool::validate`
pub trait TemplateCatalog: Send + Sync {
    /// Strategies in the order they are presented.
    fn strategies(&self) -> &[Strategy];

    /// Message templates for one archetype.
    fn message_templates(&self, archetype: Archetype) -> &[MessageTemplate];

    /// Pool for simulated counterparty answers.
    fn response_pool(&self) -> &ResponsePool;
}
