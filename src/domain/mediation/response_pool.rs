//! Canned counterparty answers for the generated path.
//!
//! The pool is plain data supplied by a template catalog. Randomness is
//! passed in by the caller so a seeded rng reproduces the same answers.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Case, CounterpartyResponse, FrustrationLevel, MediationError};
use crate::domain::messaging::TemplateVars;

fn default_frustration_min() -> u8 {
    4
}

fn default_frustration_max() -> u8 {
    8
}

fn default_compromise_probability() -> f64 {
    2.0 / 3.0
}

/// Template pool for simulated counterparty answers.
///
/// Fact options may reference `{fact_N}`, the Nth word of the user's facts.
/// Options whose referenced words do not exist are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePool {
    pub facts: Vec<String>,
    pub motives: Vec<String>,
    pub past_attempts: Vec<String>,
    pub ideal_fix: String,
    pub misunderstandings: String,
    pub impact: String,
    #[serde(default = "default_frustration_min")]
    pub frustration_min: u8,
    #[serde(default = "default_frustration_max")]
    pub frustration_max: u8,
    #[serde(default = "default_compromise_probability")]
    pub compromise_probability: f64,
}

impl ResponsePool {
    /// Checks the pool can always produce a complete response.
    pub fn validate(&self) -> Result<(), MediationError> {
        for (name, options) in [
            ("facts", &self.facts),
            ("motives", &self.motives),
            ("past_attempts", &self.past_attempts),
        ] {
            if options.iter().all(|o| o.trim().is_empty()) {
                return Err(MediationError::catalog(format!(
                    "response pool '{}' has no options",
                    name
                )));
            }
        }
        if self.ideal_fix.trim().is_empty() {
            return Err(MediationError::catalog("response pool ideal_fix is empty"));
        }
        if !(FrustrationLevel::MIN..=FrustrationLevel::MAX).contains(&self.frustration_min)
            || !(FrustrationLevel::MIN..=FrustrationLevel::MAX).contains(&self.frustration_max)
            || self.frustration_min > self.frustration_max
        {
            return Err(MediationError::catalog(format!(
                "response pool frustration range {}..={} is outside 1..=10",
                self.frustration_min, self.frustration_max
            )));
        }
        if !(0.0..=1.0).contains(&self.compromise_probability) {
            return Err(MediationError::catalog(
                "response pool compromise_probability must be within 0..=1",
            ));
        }
        Ok(())
    }

    /// Draws a complete counterparty response for `case`.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the pool is invalid or no fact option fits the case
    pub fn generate<R: Rng + ?Sized>(
        &self,
        case: &Case,
        rng: &mut R,
    ) -> Result<CounterpartyResponse, MediationError> {
        self.validate()?;

        let vars = fact_vars(case.user_facts());
        let usable_facts: Vec<&String> = self
            .facts
            .iter()
            .filter(|option| !option.trim().is_empty() && vars.missing(option).is_empty())
            .collect();

        let facts = usable_facts
            .choose(rng)
            .map(|option| vars.render(option))
            .ok_or_else(|| {
                MediationError::catalog("no fact option fits the user's facts")
            })?;

        Ok(CounterpartyResponse {
            facts,
            motive_theory: pick(&self.motives, rng)?,
            past_attempts: pick(&self.past_attempts, rng)?,
            frustration_level: FrustrationLevel::clamped(i32::from(
                rng.gen_range(self.frustration_min..=self.frustration_max),
            )),
            ideal_fix: self.ideal_fix.clone(),
            misunderstandings: self.misunderstandings.clone(),
            impact: self.impact.clone(),
            willing_to_compromise: rng.gen_bool(self.compromise_probability),
        })
    }
}

fn pick<R: Rng + ?Sized>(options: &[String], rng: &mut R) -> Result<String, MediationError> {
    let usable: Vec<&String> = options.iter().filter(|o| !o.trim().is_empty()).collect();
    usable
        .choose(rng)
        .map(|option| option.to_string())
        .ok_or_else(|| MediationError::catalog("response pool list is empty"))
}

/// `fact_1`..`fact_N` bound to the words of the user's facts.
fn fact_vars(user_facts: &str) -> TemplateVars {
    let mut vars = TemplateVars::new();
    for (idx, word) in user_facts.split_whitespace().enumerate() {
        vars.set(format!("fact_{}", idx + 1), word);
    }
    vars
}
