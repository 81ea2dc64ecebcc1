//! Mediation flow controller and its commands.

mod commands;
mod flow;

pub use commands::{IdentifyProblemCommand, ManualResponseCommand, UserPerspectiveCommand};
pub use flow::MediationFlow;
