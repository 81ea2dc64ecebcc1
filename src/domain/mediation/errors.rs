//! Mediation-specific error types.

use thiserror::Error;

use super::Stage;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Refusal shown when the problem description trips the content screen.
pub const CONTENT_POLICY_MESSAGE: &str =
    "This appears to involve illegal activity. Please seek professional help or contact authorities.";

/// Errors returned by mediation operations.
///
/// Every variant leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediationError {
    /// One or more required fields were empty after trimming.
    #[error("Validation failed: {}", describe(.errors))]
    Validation { errors: Vec<ValidationError> },

    /// Input matched the forbidden-content screen.
    #[error("{message}")]
    ContentPolicy { field: String, message: String },

    /// A selector fell outside its domain.
    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    Range {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    /// A stage operation was invoked while the cursor was elsewhere.
    #[error("Cannot {operation} at stage '{actual}', expected '{expected}'")]
    IllegalState {
        operation: &'static str,
        expected: Stage,
        actual: Stage,
    },

    /// A manual-entry operation ran at the right stage before the manual
    /// option was chosen.
    #[error("Cannot {operation}: the manual response form is not open, choose the manual option first")]
    ManualEntryNotOpen { operation: &'static str },

    /// A template collaborator supplied unusable data.
    #[error("Template catalog error: {0}")]
    Catalog(String),
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MediationError {
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        MediationError::Validation { errors }
    }

    pub fn content_policy(field: impl Into<String>) -> Self {
        MediationError::ContentPolicy {
            field: field.into(),
            message: CONTENT_POLICY_MESSAGE.to_string(),
        }
    }

    pub fn range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        MediationError::Range {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn illegal_state(operation: &'static str, expected: Stage, actual: Stage) -> Self {
        MediationError::IllegalState {
            operation,
            expected,
            actual,
        }
    }

    pub fn manual_entry_not_open(operation: &'static str) -> Self {
        MediationError::ManualEntryNotOpen { operation }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        MediationError::Catalog(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MediationError::Validation { .. } => ErrorCode::ValidationFailed,
            MediationError::ContentPolicy { .. } => ErrorCode::ContentPolicyViolation,
            MediationError::Range { .. } => ErrorCode::OutOfRange,
            MediationError::IllegalState { .. } | MediationError::ManualEntryNotOpen { .. } => {
                ErrorCode::InvalidStateTransition
            }
            MediationError::Catalog(_) => ErrorCode::CatalogError,
        }
    }

    /// Names of the fields a form should highlight.
    pub fn offending_fields(&self) -> Vec<&str> {
        match self {
            MediationError::Validation { errors } => {
                errors.iter().map(ValidationError::field).collect()
            }
            MediationError::ContentPolicy { field, .. } | MediationError::Range { field, .. } => {
                vec![field.as_str()]
            }
            MediationError::IllegalState { .. }
            | MediationError::ManualEntryNotOpen { .. }
            | MediationError::Catalog(_) => Vec::new(),
        }
    }
}

/// Collects an `EmptyField` error for every blank field, in argument order.
pub(crate) fn require_filled(fields: &[(&str, &str)]) -> Result<(), MediationError> {
    let errors: Vec<ValidationError> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| ValidationError::empty_field(*name))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(MediationError::validation(errors))
    }
}
