//! Analysis module - Pure derived views over a case.
//!
//! Nothing here touches the stage cursor; the flow controller only decides
//! when a summary may be read.

mod perspective;
mod summary;

pub use perspective::{
    agreement_rate, common_facts, emotional_gap, estimate_user_intensity, shared_fact_words,
    word_set, BASE_INTENSITY, DEFAULT_COMMON_FACTS, INTENSITY_INDICATORS, MAX_INTENSITY,
};
pub use summary::{truncate_cell, ConflictSummary, SummaryRow, MAX_FACT_CELL_CHARS};
