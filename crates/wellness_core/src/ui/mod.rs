//! Widget-side logic consumed by the host UI.
//!
//! # Responsibility
//! - Hold ephemeral widget state (timers, phases, selections).
//! - Derive display values from `WellnessState` without mutating it.
//!
//! # Invariants
//! - Widgets change persisted data only through `WellnessStore` operations.
//! - Each widget owns at most one active timer per concern (`TimerSlot`).

pub mod break_reminder;
pub mod dashboard;
pub mod messages;
pub mod relaxation;
pub mod timer;
