//! Resolution message composition.
//!
//! Turns a chosen strategy and a case into ready-to-send message variants by
//! filling the archetype's templates. Stateless; the presentation layer may
//! call it directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TemplateVars;
use crate::domain::analysis::common_facts;
use crate::domain::mediation::{Case, Strategy};

/// Ordered keyword map used to name what the conflict is about.
pub const TRIGGERS: &[(&str, &str)] = &[
    ("chore", "shared chores"),
    ("money", "financial arrangements"),
    ("space", "personal space"),
    ("communication", "communication style"),
    ("responsibility", "shared responsibilities"),
    ("clean", "cleaning responsibilities"),
    ("noise", "noise levels"),
    ("guest", "guest visits"),
];

/// Trigger used when no keyword matches.
pub const DEFAULT_TRIGGER: &str = "the situation";

/// Delivery tone of a message variant, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTone {
    Soft,
    Firm,
    Direct,
}

impl MessageTone {
    pub fn label(&self) -> &'static str {
        match self {
            MessageTone::Soft => "Soft",
            MessageTone::Firm => "Firm",
            MessageTone::Direct => "Direct",
        }
    }

    /// When this tone is the right pick.
    pub fn best_for(&self) -> &'static str {
        match self {
            MessageTone::Soft => "Initial approach, maintaining relationship",
            MessageTone::Firm => "When soft approach doesn't work",
            MessageTone::Direct => "Clear boundaries, exit strategies",
        }
    }
}

impl fmt::Display for MessageTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An unfilled message body for one tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub tone: MessageTone,
    pub body: String,
}

/// A filled message ready to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionMessage {
    pub tone: MessageTone,
    pub best_for: String,
    pub content: String,
}

/// Names what the conflict is about from the problem description.
pub fn extract_trigger(problem: &str) -> &'static str {
    let lower = problem.to_lowercase();
    TRIGGERS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, trigger)| *trigger)
        .unwrap_or(DEFAULT_TRIGGER)
}

/// What the counterparty gains from the strategy.
pub fn benefit_for_counterparty(strategy: &Strategy) -> &'static str {
    let description = strategy.description.to_lowercase();
    if description.contains("free time") {
        "more free time and less stress"
    } else if description.contains("flexibility") {
        "more flexibility and reduced obligations"
    } else {
        "a better living/working environment"
    }
}

/// Builds the substitution variables for a strategy and case.
pub fn message_vars(strategy: &Strategy, case: &Case) -> TemplateVars {
    let common_ground = common_facts(case);
    let motive = case
        .counterparty()
        .motive_theory
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let mut vars = TemplateVars::new()
        .with("counterparty", case.counterparty_label())
        .with("trigger", extract_trigger(case.problem_description()))
        .with("strategy_name", strategy.name.as_str())
        .with("strategy_name_lower", strategy.name.to_lowercase())
        .with("desired_outcome_lower", case.desired_outcome().to_lowercase())
        .with("common_ground_lower", common_ground.to_lowercase())
        .with("common_ground", common_ground)
        .with("counterparty_motive_lower", motive)
        .with("benefit", benefit_for_counterparty(strategy));

    for (idx, step) in strategy.steps.iter().enumerate() {
        vars.set(format!("step_{}", idx + 1), step.as_str());
    }
    if let Some(first) = strategy.steps.first() {
        vars.set("step_1_lower", first.to_lowercase());
    }
    if let Some(word) = strategy
        .steps
        .last()
        .and_then(|step| step.split_whitespace().last())
    {
        vars.set("final_step_last_word", word);
    }

    vars
}

/// Fills the templates for a strategy, ordered Soft, Firm, Direct.
pub fn compose_messages(
    strategy: &Strategy,
    case: &Case,
    templates: &[MessageTemplate],
) -> Vec<ResolutionMessage> {
    let vars = message_vars(strategy, case);
    let mut ordered: Vec<&MessageTemplate> = templates.iter().collect();
    ordered.sort_by_key(|t| t.tone);

    ordered
        .into_iter()
        .map(|template| ResolutionMessage {
            tone: template.tone,
            best_for: template.tone.best_for().to_string(),
            content: vars.render(template.body.trim()),
        })
        .collect()
}
