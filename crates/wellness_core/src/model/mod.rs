//! Wellness domain model.
//!
//! # Responsibility
//! - Define the single `WellnessState` aggregate and the entities it owns.
//! - Provide input validation shared by every mutation path.
//!
//! # Invariants
//! - The aggregate is the only owner of wellness data; callers read snapshots.
//! - Wire field names match the persisted snapshot layout and never change
//!   without a snapshot migration.
//!
//! # See also
//! - crate::snapshot for the persisted envelope and migrations.

pub mod entry;
pub mod state;
pub mod validation;
