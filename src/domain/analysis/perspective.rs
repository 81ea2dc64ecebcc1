//! Perspective comparison heuristics.
//!
//! Word-overlap and keyword counts over the free-text answers of both sides.
//! All functions are pure and tolerate empty input.

use std::collections::BTreeSet;

use crate::domain::foundation::Percentage;
use crate::domain::mediation::Case;

/// Words that nudge the user's estimated intensity upward.
pub const INTENSITY_INDICATORS: &[&str] = &[
    "frustrated",
    "angry",
    "upset",
    "annoyed",
    "tired",
    "stressed",
    "hate",
    "dislike",
];

/// Baseline intensity before indicators and verbosity are counted.
pub const BASE_INTENSITY: u8 = 5;

/// Ceiling for the intensity estimate.
pub const MAX_INTENSITY: u8 = 10;

/// Words per extra intensity point.
const WORDS_PER_POINT: usize = 20;

/// Fallback when the two fact accounts share too few words.
pub const DEFAULT_COMMON_FACTS: &str = "Shared living/working space acknowledged";

/// Lowercased, whitespace-separated word set of `text`.
pub fn word_set(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Words that appear in both the user's and the counterparty's facts.
pub fn shared_fact_words(case: &Case) -> BTreeSet<String> {
    let user = word_set(case.user_facts());
    let counterparty = word_set(&case.counterparty().facts);
    user.intersection(&counterparty).cloned().collect()
}

/// Share of the user's distinct fact words that the counterparty also used.
///
/// Zero when the user gave no facts.
pub fn agreement_rate(user_facts: &str, counterparty_facts: &str) -> Percentage {
    let user = word_set(user_facts);
    let counterparty = word_set(counterparty_facts);
    let common = user.intersection(&counterparty).count();
    Percentage::from_ratio(common, user.len())
}

/// Common-ground phrase for the facts row of the summary table.
pub fn common_facts(case: &Case) -> String {
    let shared = shared_fact_words(case);
    if shared.len() > 3 {
        let first: Vec<&str> = shared.iter().take(3).map(String::as_str).collect();
        format!("Both mention: {}", first.join(", "))
    } else {
        DEFAULT_COMMON_FACTS.to_string()
    }
}

/// Estimates the user's emotional intensity on a 1-10 scale.
///
/// Starts at [`BASE_INTENSITY`], adds one per indicator word present in the
/// user's answers and one per twenty words written, capped at [`MAX_INTENSITY`].
pub fn estimate_user_intensity(case: &Case) -> u8 {
    let text = format!(
        "{} {} {}",
        case.user_facts(),
        case.user_motive_theory(),
        case.user_past_attempts()
    );
    let lower = text.to_lowercase();

    let indicators = INTENSITY_INDICATORS
        .iter()
        .filter(|word| lower.contains(*word))
        .count();
    let verbosity = text.split_whitespace().count() / WORDS_PER_POINT;

    (BASE_INTENSITY as usize + indicators + verbosity).min(MAX_INTENSITY as usize) as u8
}

/// Absolute difference between user intensity and counterparty frustration.
pub fn emotional_gap(case: &Case) -> u8 {
    let user = estimate_user_intensity(case);
    let counterparty = case.counterparty().frustration_level.value();
    user.abs_diff(counterparty)
}
