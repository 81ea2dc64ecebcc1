//! Builtin template catalog.
//!
//! Ships the stock strategy texts, the per-archetype message templates and
//! the roommate-dispute response pool. Data is built once on first use.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::domain::mediation::{Archetype, ResponsePool, Strategy};
use crate::domain::messaging::{MessageTemplate, MessageTone};
use crate::ports::TemplateCatalog;

const COLLABORATIVE_SOFT: &str = "\
Hi {counterparty},

Mediator Bot insight: I've been thinking about our situation with {trigger}.
What if we tried a {strategy_name_lower} for 30 days?

The idea: {step_1_lower}

This could help both of us get what we want: you more {benefit}, me {desired_outcome_lower}.

No pressure - just wanted to explore if this approach might work for you too.

Best,
[Anonymous]";

const COLLABORATIVE_FIRM: &str = "\
Hi {counterparty},

Data shows we both agree on the core issue: {common_ground_lower}.

Given that, I'd like to propose the {strategy_name_lower}: {step_2}

This addresses your concern about {counterparty_motive_lower} while moving toward my goal of {desired_outcome_lower}.

Thoughts? Let me know by [date 3 days from now].

Thanks,
[Anonymous]";

const COLLABORATIVE_DIRECT: &str = "\
Hi {counterparty},

Since we haven't found a workable solution for {trigger}, I'm proposing a clean separation approach.

Going forward: {step_1}

This minimizes conflict while ensuring essential needs are met. Let me know if you agree to these minimal interaction terms.

If no response by [date 1 week from now], I'll proceed with this plan.

Regards,
[Anonymous]";

const EXIT_SOFT: &str = "\
Hi {counterparty},

After trying to resolve {trigger}, I believe we need clearer boundaries.

Proposed: {step_1}

This ensures minimal conflict while protecting both our interests. Let me know if you agree.

[Anonymous]";

fn strategy(
    name: &str,
    archetype: Archetype,
    description: &str,
    steps: [&str; 5],
    timeline: &str,
) -> Strategy {
    Strategy {
        name: name.to_string(),
        archetype,
        description: description.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        timeline: timeline.to_string(),
    }
}

fn templates(soft: &str, firm: &str, direct: &str) -> Vec<MessageTemplate> {
    [
        (MessageTone::Soft, soft),
        (MessageTone::Firm, firm),
        (MessageTone::Direct, direct),
    ]
    .into_iter()
    .map(|(tone, body)| MessageTemplate {
        tone,
        body: body.to_string(),
    })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static STRATEGIES: Lazy<Vec<Strategy>> = Lazy::new(|| {
    vec![
        strategy(
            "Shared Responsibility System",
            Archetype::Collaborative,
            "Create a structured system that benefits both parties through mutual accountability.",
            [
                "Propose a trial period with a shared chore/schedule app that tracks contributions transparently",
                "Set up weekly 10-minute check-ins to review progress and adjust assignments based on current workload",
                "Implement a point system where completed tasks earn flexibility credits for future use",
                "Create clear escalation path for unresolved issues with predefined resolution steps",
                "Review and adjust system after 30 days based on feedback and participation rates",
            ],
            "30-60 days to full implementation",
        ),
        strategy(
            "Framed Benefit Approach",
            Archetype::Assertive,
            "Frame the solution as a benefit to the counterparty while achieving user goals.",
            [
                "Present data showing how current situation affects the counterparty's goals and well-being",
                "Offer solution that gives the counterparty more free time/energy while meeting core needs",
                "Create 'win' messaging: 'This helps you get what you want while reducing stress'",
                "Set clear expectations with gentle but firm boundaries and consequences",
                "Follow up with positive reinforcement when cooperation occurs, address slip-ups promptly",
            ],
            "2-3 weeks for initial agreement",
        ),
        strategy(
            "Graceful Separation",
            Archetype::Exit,
            "Minimize contact and create clear boundaries for peaceful coexistence.",
            [
                "Establish minimal necessary interaction protocols with clear communication boundaries",
                "Create written agreement on essential shared responsibilities only, nothing extra",
                "Set up systems to avoid direct coordination (separate schedules, automated payments)",
                "Identify exit options if situation doesn't improve (room transfer, boundary enforcement, separation)",
                "Implement gradual disengagement while maintaining professionalism and essential cooperation",
            ],
            "Immediate boundaries, 60-90 days for full separation",
        ),
    ]
});

static MESSAGE_TEMPLATES: Lazy<BTreeMap<Archetype, Vec<MessageTemplate>>> = Lazy::new(|| {
    BTreeMap::from([
        (
            Archetype::Collaborative,
            templates(COLLABORATIVE_SOFT, COLLABORATIVE_FIRM, COLLABORATIVE_DIRECT),
        ),
        (
            Archetype::Assertive,
            templates(
                "Mediator Bot insight: Try {step_1} Wins for both?",
                "Data shows {common_ground}. Propose {strategy_name}. Reply?",
                "No fix? Clean break via {step_1}. Confirm?",
            ),
        ),
        (
            Archetype::Exit,
            templates(
                EXIT_SOFT,
                "Boundary proposal: {step_2}. No response = agreement by {final_step_last_word}.",
                "Final proposal: {step_3}. Implementing in 7 days if no objection.",
            ),
        ),
    ])
});

static RESPONSE_POOL: Lazy<ResponsePool> = Lazy::new(|| ResponsePool {
    facts: strings(&[
        "I did help with chores on {fact_1} and {fact_4}",
        "I've been dealing with work stress, which affected my availability",
        "I thought we had an informal agreement about rotating responsibilities",
        "I noticed some of the tasks weren't clearly defined or assigned",
        "I was under the impression you preferred handling certain tasks yourself",
        "I've been contributing in ways that might not be immediately visible",
    ]),
    motives: strings(&[
        "I feel overwhelmed with my current workload",
        "I didn't realize the impact my actions had on you",
        "I thought you preferred handling certain tasks yourself",
        "I was waiting for a clear discussion about expectations",
        "I've been trying to avoid conflict by not bringing it up",
        "I assumed we were managing things informally and it was working",
    ]),
    past_attempts: strings(&[
        "I suggested creating a chore chart last month",
        "I offered to handle cooking if you'd manage cleaning",
        "I tried talking about it but didn't want to cause conflict",
        "I assumed we were managing things informally",
        "I proposed a different system but it wasn't well-received",
        "I've been doing tasks when I have time, just not on a set schedule",
    ]),
    ideal_fix: "Create a clear, shared responsibility system that works for both of us with flexibility for busy periods".to_string(),
    misunderstandings: "I think we might have different expectations about what 'fair' means and when to bring up concerns".to_string(),
    impact: "This situation has been causing me stress at work too, affecting my focus and energy levels".to_string(),
    frustration_min: 4,
    frustration_max: 8,
    compromise_probability: 2.0 / 3.0,
});

/// Catalog with the stock roommate-mediation texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCatalog for BuiltinCatalog {
    fn strategies(&self) -> &[Strategy] {
        &STRATEGIES
    }

    fn message_templates(&self, archetype: Archetype) -> &[MessageTemplate] {
        MESSAGE_TEMPLATES
            .get(&archetype)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn response_pool(&self) -> &ResponsePool {
        &RESPONSE_POOL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messaging::placeholders;

    #[test]
    fn strategies_follow_archetype_order() {
        let archetypes: Vec<Archetype> = BuiltinCatalog
            .strategies()
            .iter()
            .map(|s| s.archetype)
            .collect();
        assert_eq!(archetypes, Archetype::all().to_vec());
    }

    #[test]
    fn every_strategy_has_five_steps() {
        for strategy in BuiltinCatalog.strategies() {
            assert_eq!(strategy.steps.len(), 5, "{}", strategy.name);
        }
    }

    #[test]
    fn every_archetype_has_all_three_tones() {
        for archetype in Archetype::all() {
            let tones: Vec<MessageTone> = BuiltinCatalog
                .message_templates(*archetype)
                .iter()
                .map(|t| t.tone)
                .collect();
            assert_eq!(
                tones,
                vec![MessageTone::Soft, MessageTone::Firm, MessageTone::Direct]
            );
        }
    }

    #[test]
    fn templates_only_use_known_placeholders() {
        const KNOWN: &[&str] = &[
            "counterparty",
            "trigger",
            "strategy_name",
            "strategy_name_lower",
            "step_1",
            "step_2",
            "step_3",
            "step_1_lower",
            "final_step_last_word",
            "desired_outcome_lower",
            "common_ground",
            "common_ground_lower",
            "counterparty_motive_lower",
            "benefit",
        ];
        for archetype in Archetype::all() {
            for template in BuiltinCatalog.message_templates(*archetype) {
                for slot in placeholders(&template.body) {
                    assert!(KNOWN.contains(&slot), "unknown placeholder {}", slot);
                }
            }
        }
    }

    #[test]
    fn response_pool_is_valid() {
        let pool = BuiltinCatalog.response_pool();
        assert!(pool.validate().is_ok());
        assert_eq!(pool.facts.len(), 6);
        assert_eq!(pool.motives.len(), 6);
        assert_eq!(pool.past_attempts.len(), 6);
    }
}
