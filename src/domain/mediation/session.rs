//! Per-session mediation context.
//!
//! A `MediationSession` holds everything one user's walk through the flow
//! owns: the cursor, the live case, the chosen strategy, the manual-entry
//! flag and the tone of the message the user marked as sent. The hosting layer keeps one per user and passes it into every
//! `MediationFlow` operation. Mutation is crate-private so the cursor only
//! moves through the flow controller.

use serde::{Deserialize, Serialize};

use super::{Case, MediationError, Stage, Strategy};
use crate::domain::foundation::ValidationError;
use crate::domain::messaging::MessageTone;

/// The state of one mediation session.
///
/// # Invariants
///
/// - `case` is `None` exactly when `stage` is `Identification`
/// - `selected_strategy` is `Some` exactly when `stage` is `ResolutionMessages`
/// - `awaiting_manual_entry` is only set at `ResponseInvitation`
/// - `sent_message` is only set at `ResolutionMessages`
///
/// Deserialization checks these, so a restored session cannot put the
/// cursor somewhere its data does not support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct MediationSession {
    stage: Stage,
    case: Option<Case>,
    selected_strategy: Option<Strategy>,
    awaiting_manual_entry: bool,
    sent_message: Option<MessageTone>,
}

/// Unchecked wire form of a session.
#[derive(Deserialize)]
struct SessionRecord {
    stage: Stage,
    case: Option<Case>,
    selected_strategy: Option<Strategy>,
    #[serde(default)]
    awaiting_manual_entry: bool,
    #[serde(default)]
    sent_message: Option<MessageTone>,
}

impl TryFrom<SessionRecord> for MediationSession {
    type Error = MediationError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let stage = record.stage;
        let mut errors = Vec::new();

        match &record.case {
            None if stage != Stage::Identification => {
                errors.push(mismatch("case", "required after identification"));
            }
            Some(_) if stage == Stage::Identification => {
                errors.push(mismatch("case", "must be empty at identification"));
            }
            Some(case)
                if stage.has_reached(&Stage::ResponseInvitation)
                    && !case.has_user_perspective() =>
            {
                errors.push(mismatch("case", "user perspective missing"));
            }
            _ => {}
        }
        if record.selected_strategy.is_some() != (stage == Stage::ResolutionMessages) {
            errors.push(mismatch(
                "selected_strategy",
                "present only at resolution messages",
            ));
        }
        if record.awaiting_manual_entry && stage != Stage::ResponseInvitation {
            errors.push(mismatch(
                "awaiting_manual_entry",
                "set only at response invitation",
            ));
        }
        if record.sent_message.is_some() && stage != Stage::ResolutionMessages {
            errors.push(mismatch("sent_message", "set only at resolution messages"));
        }

        if !errors.is_empty() {
            return Err(MediationError::validation(errors));
        }

        Ok(Self {
            stage,
            case: record.case,
            selected_strategy: record.selected_strategy,
            awaiting_manual_entry: record.awaiting_manual_entry,
            sent_message: record.sent_message,
        })
    }
}

fn mismatch(field: &str, reason: &str) -> ValidationError {
    ValidationError::invalid_format(field, reason)
}

/// Read-only view of a session for rendering.
pub type SessionSnapshot = MediationSession;

impl MediationSession {
    /// Creates a session at the identification stage with no case.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    pub fn selected_strategy(&self) -> Option<&Strategy> {
        self.selected_strategy.as_ref()
    }

    /// Returns true while the manual counterparty form should be shown.
    pub fn awaiting_manual_entry(&self) -> bool {
        self.awaiting_manual_entry
    }

    /// Tone of the message the user marked as sent, if any.
    pub fn sent_message(&self) -> Option<MessageTone> {
        self.sent_message
    }

    /// Returns an owned copy for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Crate-private mutations (driven by MediationFlow)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn case_mut(&mut self) -> Option<&mut Case> {
        self.case.as_mut()
    }

    pub(crate) fn replace_case(&mut self, case: Case) {
        self.case = Some(case);
    }

    pub(crate) fn set_selected_strategy(&mut self, strategy: Strategy) {
        self.selected_strategy = Some(strategy);
    }

    pub(crate) fn set_awaiting_manual_entry(&mut self, awaiting: bool) {
        self.awaiting_manual_entry = awaiting;
    }

    pub(crate) fn set_sent_message(&mut self, tone: MessageTone) {
        self.sent_message = Some(tone);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
