//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `mediation` - Case aggregate, stage cursor and session context
//! - `analysis` - Pure derived views (agreement rate, summary)
//! - `messaging` - Template substitution and resolution messages

pub mod analysis;
pub mod foundation;
pub mod mediation;
pub mod messaging;
