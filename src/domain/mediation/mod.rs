//! Mediation domain module.
//!
//! Models one user's walk through the mediation flow: the case record, the
//! stage cursor, the counterparty's answers and the chosen strategy.

mod case;
mod errors;
mod response;
mod response_pool;
mod session;
mod stage;
mod strategy;

pub use case::Case;
pub use errors::{MediationError, CONTENT_POLICY_MESSAGE};
pub use response::{CounterpartyResponse, FrustrationLevel, ResponseSource, ResponseSourceChoice};
pub use response_pool::ResponsePool;
pub use session::{MediationSession, SessionSnapshot};
pub use stage::{Stage, StageStatus};
pub use strategy::{Archetype, Strategy};
