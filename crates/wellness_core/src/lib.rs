//! Core domain logic for the wellness tracker.
//! This crate is the single source of truth for wellness state invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;
pub mod ui;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::entry::{Goal, GoalId, GratitudeEntry, MoodEntry, WorkoutEntry};
pub use model::state::{BreakTimerState, Preferences, WaterLog, WellnessState};
pub use model::validation::InputError;
pub use repo::snapshot_repo::{
    InMemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository,
};
pub use service::transition::{StoreError, StoreResult, WellnessAction};
pub use service::wellness_store::WellnessStore;
pub use snapshot::{DecodedSnapshot, SnapshotError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
