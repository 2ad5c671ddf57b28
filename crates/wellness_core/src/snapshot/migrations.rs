//! Snapshot layout migrations.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - Each step only rewrites the raw JSON state; typed decoding happens after
//!   the last step.

use super::{SnapshotError, SnapshotResult};
use crate::model::state::DEFAULT_BREAK_INTERVAL_MINUTES;
use serde_json::{Map, Value};

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    apply: fn(&mut Map<String, Value>),
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    apply: fill_v0_gaps,
}];

/// Returns the snapshot version written by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

pub(super) fn migrate(mut state: Value, from_version: u32) -> SnapshotResult<Value> {
    let object = state
        .as_object_mut()
        .ok_or_else(|| SnapshotError::InvalidShape("`state` must be a JSON object".into()))?;

    for migration in MIGRATIONS {
        if migration.version <= from_version {
            continue;
        }
        (migration.apply)(object);
    }

    Ok(state)
}

/// Version 0 is the layout written before workouts existed. It may also lack
/// the break interval and eye-rest flag, and may carry numeric goal ids.
fn fill_v0_gaps(state: &mut Map<String, Value>) {
    state
        .entry("workoutEntries")
        .or_insert_with(|| Value::Array(Vec::new()));
    state
        .entry("breakInterval")
        .or_insert_with(|| Value::from(DEFAULT_BREAK_INTERVAL_MINUTES));
    state
        .entry("eyeRestReminders")
        .or_insert(Value::Bool(true));
    state
        .entry("notifications")
        .or_insert(Value::Bool(true));
    state
        .entry("relaxingMusic")
        .or_insert(Value::Bool(false));

    if let Some(Value::Array(goals)) = state.get_mut("goals") {
        for goal in goals.iter_mut() {
            let numeric_id = match goal.get("id") {
                Some(Value::Number(number)) => Some(number.to_string()),
                _ => None,
            };
            if let Some(id) = numeric_id {
                goal["id"] = Value::String(id);
            }
        }
    }
}
