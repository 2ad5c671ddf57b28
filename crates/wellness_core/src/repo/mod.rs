//! Snapshot persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save/clear contract the store depends on.
//! - Keep SQL and payload encoding out of the store.
//!
//! # Invariants
//! - One storage key maps to at most one snapshot.
//! - Saves replace the whole snapshot; there are no partial writes.

pub mod snapshot_repo;
