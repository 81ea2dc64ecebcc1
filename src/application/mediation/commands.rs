//! Commands accepted by the mediation flow.

use crate::domain::mediation::{CounterpartyResponse, FrustrationLevel};

/// Command to open a case from the identification form.
#[derive(Debug, Clone, Default)]
pub struct IdentifyProblemCommand {
    pub problem_description: String,
    pub counterparty: String,
    pub desired_outcome: String,
}

impl IdentifyProblemCommand {
    pub fn new(
        problem_description: impl Into<String>,
        counterparty: impl Into<String>,
        desired_outcome: impl Into<String>,
    ) -> Self {
        Self {
            problem_description: problem_description.into(),
            counterparty: counterparty.into(),
            desired_outcome: desired_outcome.into(),
        }
    }
}

/// Command carrying the user's own perspective.
#[derive(Debug, Clone, Default)]
pub struct UserPerspectiveCommand {
    pub facts: String,
    pub motive_theory: String,
    pub past_attempts: String,
}

impl UserPerspectiveCommand {
    pub fn new(
        facts: impl Into<String>,
        motive_theory: impl Into<String>,
        past_attempts: impl Into<String>,
    ) -> Self {
        Self {
            facts: facts.into(),
            motive_theory: motive_theory.into(),
            past_attempts: past_attempts.into(),
        }
    }
}

/// Command carrying the counterparty's answers typed in by the user.
///
/// `frustration_level` is taken as entered and clamped to 1..=10.
#[derive(Debug, Clone)]
pub struct ManualResponseCommand {
    pub facts: String,
    pub motive_theory: String,
    pub past_attempts: String,
    pub frustration_level: i32,
    pub ideal_fix: String,
    pub misunderstandings: String,
    pub impact: String,
    pub willing_to_compromise: bool,
}

impl Default for ManualResponseCommand {
    fn default() -> Self {
        Self {
            facts: String::new(),
            motive_theory: String::new(),
            past_attempts: String::new(),
            frustration_level: i32::from(FrustrationLevel::DEFAULT),
            ideal_fix: String::new(),
            misunderstandings: String::new(),
            impact: String::new(),
            willing_to_compromise: false,
        }
    }
}

impl From<ManualResponseCommand> for CounterpartyResponse {
    fn from(cmd: ManualResponseCommand) -> Self {
        CounterpartyResponse {
            facts: cmd.facts,
            motive_theory: cmd.motive_theory,
            past_attempts: cmd.past_attempts,
            frustration_level: FrustrationLevel::clamped(cmd.frustration_level),
            ideal_fix: cmd.ideal_fix,
            misunderstandings: cmd.misunderstandings,
            impact: cmd.impact,
            willing_to_compromise: cmd.willing_to_compromise,
        }
    }
}
