//! Case aggregate entity.
//!
//! A case is the record of one user's mediation session. It is opened when
//! the identification stage commits and filled in stage by stage afterwards.

use serde::{Deserialize, Serialize};

use super::errors::require_filled;
use super::{CounterpartyResponse, MediationError, ResponseSource};
use crate::domain::foundation::{CaseId, Timestamp};

/// Case aggregate.
///
/// # Invariants
///
/// - `id` is globally unique
/// - problem, counterparty and desired outcome are non-empty and trimmed
/// - user perspective fields are either all empty or all non-empty
/// - `updated_at` is refreshed by every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    id: CaseId,
    problem_description: String,
    counterparty_label: String,
    desired_outcome: String,

    user_facts: String,
    user_motive_theory: String,
    user_past_attempts: String,

    counterparty: CounterpartyResponse,
    response_source: ResponseSource,

    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Case {
    /// Open a new case from the identification answers.
    ///
    /// # Errors
    ///
    /// - `Validation` with one entry per blank field
    pub fn open(
        problem_description: &str,
        counterparty_label: &str,
        desired_outcome: &str,
    ) -> Result<Self, MediationError> {
        require_filled(&[
            ("problem_description", problem_description),
            ("counterparty_label", counterparty_label),
            ("desired_outcome", desired_outcome),
        ])?;

        let now = Timestamp::now();
        Ok(Self {
            id: CaseId::new(),
            problem_description: problem_description.trim().to_string(),
            counterparty_label: counterparty_label.trim().to_string(),
            desired_outcome: desired_outcome.trim().to_string(),
            user_facts: String::new(),
            user_motive_theory: String::new(),
            user_past_attempts: String::new(),
            counterparty: CounterpartyResponse::default(),
            response_source: ResponseSource::Unset,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CaseId {
        &self.id
    }

    pub fn problem_description(&self) -> &str {
        &self.problem_description
    }

    pub fn counterparty_label(&self) -> &str {
        &self.counterparty_label
    }

    pub fn desired_outcome(&self) -> &str {
        &self.desired_outcome
    }

    pub fn user_facts(&self) -> &str {
        &self.user_facts
    }

    pub fn user_motive_theory(&self) -> &str {
        &self.user_motive_theory
    }

    pub fn user_past_attempts(&self) -> &str {
        &self.user_past_attempts
    }

    /// Returns the counterparty's answers (defaults until recorded).
    pub fn counterparty(&self) -> &CounterpartyResponse {
        &self.counterparty
    }

    pub fn response_source(&self) -> ResponseSource {
        self.response_source
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true once the user's own perspective has been recorded.
    pub fn has_user_perspective(&self) -> bool {
        !self.user_facts.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record the user's own perspective.
    ///
    /// # Errors
    ///
    /// - `Validation` with one entry per blank field; nothing is written
    pub fn record_user_perspective(
        &mut self,
        facts: &str,
        motive_theory: &str,
        past_attempts: &str,
    ) -> Result<(), MediationError> {
        require_filled(&[
            ("user_facts", facts),
            ("user_motive_theory", motive_theory),
            ("user_past_attempts", past_attempts),
        ])?;

        self.user_facts = facts.trim().to_string();
        self.user_motive_theory = motive_theory.trim().to_string();
        self.user_past_attempts = past_attempts.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Record the counterparty's answers and where they came from.
    ///
    /// # Errors
    ///
    /// - `Validation` if facts, motive, past attempts or ideal fix are blank
    pub fn record_counterparty_response(
        &mut self,
        response: CounterpartyResponse,
        source: ResponseSource,
    ) -> Result<(), MediationError> {
        require_filled(&[
            ("counterparty_facts", response.facts.as_str()),
            ("counterparty_motive_theory", response.motive_theory.as_str()),
            ("counterparty_past_attempts", response.past_attempts.as_str()),
            ("counterparty_ideal_fix", response.ideal_fix.as_str()),
        ])?;

        self.counterparty = response.trimmed();
        self.response_source = source;
        self.touch();
        Ok(())
    }

    /// Mark how the counterparty's perspective will be collected.
    pub fn set_response_source(&mut self, source: ResponseSource) {
        self.response_source = source;
        self.touch();
    }

    /// Wipe the counterparty's answers back to their defaults.
    pub fn clear_counterparty_response(&mut self) {
        self.counterparty = CounterpartyResponse::default();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
