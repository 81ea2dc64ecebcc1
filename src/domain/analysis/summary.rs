//! Side-by-side conflict summary.
//!
//! A read-only view derived from a case once both perspectives are recorded.

use serde::{Deserialize, Serialize};

use super::perspective::{agreement_rate, common_facts, emotional_gap, estimate_user_intensity};
use crate::domain::foundation::Percentage;
use crate::domain::mediation::{Case, FrustrationLevel, ResponseSource};

/// Longest fact cell shown before truncation.
pub const MAX_FACT_CELL_CHARS: usize = 200;

const COMMON_MOTIVES: &str = "Both want a peaceful, functional relationship";
const COMMON_ATTEMPTS: &str = "Both have tried informal solutions";
const COMMON_OUTCOME: &str = "Both want a better living/working situation";
const KEY_GAPS: &str =
    "Different expectations about fairness, communication styles, and responsibility distribution.";

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub aspect: String,
    pub user_side: String,
    pub counterparty_side: String,
    pub common_ground: String,
    /// `None` where intensity does not apply.
    pub intensity: Option<String>,
}

/// Balanced view of both perspectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub rows: Vec<SummaryRow>,
    pub agreement_rate: Percentage,
    pub user_intensity: u8,
    pub counterparty_frustration: FrustrationLevel,
    pub emotional_gap: u8,
    pub counterparty_willing_to_compromise: bool,
    pub response_source: ResponseSource,
    pub context: String,
    pub key_gaps: String,
    pub leverage: String,
}

impl ConflictSummary {
    /// Builds the summary for a case.
    pub fn from_case(case: &Case) -> Self {
        let counterparty = case.counterparty();
        let user_intensity = estimate_user_intensity(case);
        let intensity = format!(
            "User: {} / Counterparty: {}",
            user_intensity,
            counterparty.frustration_level.value()
        );

        let rows = vec![
            SummaryRow {
                aspect: "Core Facts/Timeline".to_string(),
                user_side: truncate_cell(case.user_facts()),
                counterparty_side: truncate_cell(&counterparty.facts),
                common_ground: common_facts(case),
                intensity: Some(intensity.clone()),
            },
            SummaryRow {
                aspect: "Motives/Why".to_string(),
                user_side: case.user_motive_theory().to_string(),
                counterparty_side: counterparty.motive_theory.clone(),
                common_ground: COMMON_MOTIVES.to_string(),
                intensity: Some(intensity.clone()),
            },
            SummaryRow {
                aspect: "Past Attempts".to_string(),
                user_side: case.user_past_attempts().to_string(),
                counterparty_side: counterparty.past_attempts.clone(),
                common_ground: COMMON_ATTEMPTS.to_string(),
                intensity: Some(intensity),
            },
            SummaryRow {
                aspect: "Desired Outcome".to_string(),
                user_side: case.desired_outcome().to_string(),
                counterparty_side: counterparty.ideal_fix.clone(),
                common_ground: COMMON_OUTCOME.to_string(),
                intensity: None,
            },
        ];

        Self {
            rows,
            agreement_rate: agreement_rate(case.user_facts(), &counterparty.facts),
            user_intensity,
            counterparty_frustration: counterparty.frustration_level,
            emotional_gap: emotional_gap(case),
            counterparty_willing_to_compromise: counterparty.willing_to_compromise,
            response_source: case.response_source(),
            context: format!(
                "{}. Both parties acknowledge the situation exists but have different \
                 perspectives on responsibility and solutions.",
                case.problem_description().trim_end_matches('.')
            ),
            key_gaps: KEY_GAPS.to_string(),
            leverage: leverage(counterparty.willing_to_compromise),
        }
    }
}

fn leverage(willing_to_compromise: bool) -> String {
    if willing_to_compromise {
        "Counterparty willing to compromise, both recognize the problem, shared desire for better situation."
            .to_string()
    } else {
        "Both recognize the problem and share a desire for a better situation.".to_string()
    }
}

/// Shortens long text to [`MAX_FACT_CELL_CHARS`] characters plus an ellipsis.
pub fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_FACT_CELL_CHARS {
        let head: String = text.chars().take(MAX_FACT_CELL_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
