//! Wellness use-case layer.
//!
//! # Responsibility
//! - Keep state transitions pure and storage-agnostic.
//! - Orchestrate transition + persistence inside `WellnessStore`.

pub mod transition;
pub mod wellness_store;
