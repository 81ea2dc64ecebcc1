//! Application layer - Commands and the flow controller.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands carry form input; `MediationFlow` validates them against the
//! session cursor and applies them.

pub mod mediation;

pub use mediation::{
    IdentifyProblemCommand, ManualResponseCommand, MediationFlow, UserPerspectiveCommand,
};
