//! Messaging module - template substitution and resolution messages.

mod compose;
mod template;

pub use compose::{
    benefit_for_counterparty, compose_messages, extract_trigger, message_vars, MessageTemplate,
    MessageTone, ResolutionMessage, DEFAULT_TRIGGER, TRIGGERS,
};
pub use template::{placeholders, TemplateVars};
