//! Stage cursor for the mediation flow.
//!
//! The flow is a linear chain with a single exit from the terminal stage:
//!
//! Identification → UserQuestions → ResponseInvitation → SummaryGeneration →
//! StrategySelection → ResolutionMessages → (reset) Identification
//!
//! The manual-entry sub-form of ResponseInvitation is not a stage of its own;
//! it is tracked by the session's `awaiting_manual_entry` flag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The single enumerated value indicating which step of the flow is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Identification,
    UserQuestions,
    ResponseInvitation,
    SummaryGeneration,
    StrategySelection,
    ResolutionMessages,
}

/// Where a stage sits relative to the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Current,
    Pending,
}

impl Stage {
    /// The canonical order of stages.
    pub const ORDER: [Stage; 6] = [
        Stage::Identification,
        Stage::UserQuestions,
        Stage::ResponseInvitation,
        Stage::SummaryGeneration,
        Stage::StrategySelection,
        Stage::ResolutionMessages,
    ];

    /// Returns all stages in order.
    pub fn all() -> &'static [Stage; 6] {
        &Self::ORDER
    }

    /// Returns the 0-based position of this stage in the flow.
    pub fn order_index(&self) -> usize {
        match self {
            Stage::Identification => 0,
            Stage::UserQuestions => 1,
            Stage::ResponseInvitation => 2,
            Stage::SummaryGeneration => 3,
            Stage::StrategySelection => 4,
            Stage::ResolutionMessages => 5,
        }
    }

    /// Returns the next stage in the chain, or None at the terminal stage.
    pub fn next(&self) -> Option<Stage> {
        Self::ORDER.get(self.order_index() + 1).copied()
    }

    /// Returns true if this stage comes before another in the flow.
    pub fn is_before(&self, other: &Stage) -> bool {
        self.order_index() < other.order_index()
    }

    /// Returns true if this stage is `other` or comes after it.
    pub fn has_reached(&self, other: &Stage) -> bool {
        self.order_index() >= other.order_index()
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Identification => "Problem Identification",
            Stage::UserQuestions => "User Questions",
            Stage::ResponseInvitation => "Response Invitation",
            Stage::SummaryGeneration => "Summary Generation",
            Stage::StrategySelection => "Strategy Selection",
            Stage::ResolutionMessages => "Resolution Messages",
        }
    }

    /// Reports every stage as completed, current, or pending relative to `current`.
    pub fn progress(current: Stage) -> Vec<(Stage, StageStatus)> {
        Self::ORDER
            .iter()
            .map(|&stage| {
                let status = if stage.is_before(&current) {
                    StageStatus::Completed
                } else if stage == current {
                    StageStatus::Current
                } else {
                    StageStatus::Pending
                };
                (stage, status)
            })
            .collect()
    }
}

impl StateMachine for Stage {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            // Terminal stage leaves only through reset.
            Stage::ResolutionMessages => vec![Stage::Identification],
            other => other.next().into_iter().collect(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
