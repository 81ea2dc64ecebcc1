//! Conflict Mediator - Guided interpersonal conflict mediation
//!
//! This crate walks a user through a six-stage mediation flow: describe the
//! problem, give their own perspective, collect the other party's view,
//! compare both, pick a resolution strategy and get ready-to-send messages.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
