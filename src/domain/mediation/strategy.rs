//! Resolution strategy templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three fixed strategy archetypes, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Win-win solutions, requires counterparty cooperation.
    Collaborative,
    /// User-favored, subtle pressure.
    Assertive,
    /// Clean separation, minimal contact.
    Exit,
}

impl Archetype {
    /// Returns all archetypes in presentation order.
    pub fn all() -> &'static [Archetype; 3] {
        &[Archetype::Collaborative, Archetype::Assertive, Archetype::Exit]
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Collaborative => "Collaborative (Win-Win)",
            Archetype::Assertive => "Assertive (User-Favored)",
            Archetype::Exit => "Exit (Clean Break)",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fixed strategy template offered at the selection stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub archetype: Archetype,
    pub description: String,
    pub steps: Vec<String>,
    pub timeline: String,
}

impl Strategy {
    /// Returns the 1-based step, if present.
    pub fn step(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.steps.get(idx))
            .map(String::as_str)
    }
}
