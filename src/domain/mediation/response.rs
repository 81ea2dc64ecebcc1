//! Counterparty response value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// How the counterparty's perspective was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    #[default]
    Unset,
    Generated,
    Manual,
}

/// A user selection at the response invitation stage.
///
/// Unlike [`ResponseSource`] this cannot be `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSourceChoice {
    Generated,
    Manual,
}

impl From<ResponseSourceChoice> for ResponseSource {
    fn from(choice: ResponseSourceChoice) -> Self {
        match choice {
            ResponseSourceChoice::Generated => ResponseSource::Generated,
            ResponseSourceChoice::Manual => ResponseSource::Manual,
        }
    }
}

/// Counterparty frustration on a 1-10 scale.
///
/// Form input is clamped with [`FrustrationLevel::clamped`]. Serialized data
/// is checked strictly and out-of-scale values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FrustrationLevel(u8);

impl FrustrationLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: u8 = 5;

    /// Creates a level, clamping to the 1-10 scale.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for FrustrationLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u8> for FrustrationLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "frustration_level",
                i32::from(Self::MIN),
                i32::from(Self::MAX),
                i32::from(value),
            ))
        }
    }
}

impl From<FrustrationLevel> for u8 {
    fn from(level: FrustrationLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FrustrationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// The counterparty's answers, written to a case as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterpartyResponse {
    pub facts: String,
    pub motive_theory: String,
    pub past_attempts: String,
    pub frustration_level: FrustrationLevel,
    pub ideal_fix: String,
    pub misunderstandings: String,
    pub impact: String,
    pub willing_to_compromise: bool,
}

impl CounterpartyResponse {
    /// Returns a copy with every text field trimmed.
    pub fn trimmed(self) -> Self {
        Self {
            facts: self.facts.trim().to_string(),
            motive_theory: self.motive_theory.trim().to_string(),
            past_attempts: self.past_attempts.trim().to_string(),
            frustration_level: self.frustration_level,
            ideal_fix: self.ideal_fix.trim().to_string(),
            misunderstandings: self.misunderstandings.trim().to_string(),
            impact: self.impact.trim().to_string(),
            willing_to_compromise: self.willing_to_compromise,
        }
    }
}
