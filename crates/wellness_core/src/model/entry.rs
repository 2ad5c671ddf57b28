//! Logged wellness entries owned by `WellnessState`.
//!
//! # Invariants
//! - `GoalId` values are opaque; legacy snapshots may carry non-UUID ids.
//! - Calendar days serialize as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque goal identifier, unique across all goals of one state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for GoalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GoalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for GoalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    /// Score within `MOOD_MIN..=MOOD_MAX`.
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub date: NaiveDate,
    /// Trimmed, non-empty, at most 200 characters.
    pub text: String,
}

/// Personal goal tracked until completed or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub completed: bool,
    /// Creation day.
    pub date: NaiveDate,
}

impl Goal {
    /// Creates an open goal. Title validation happens at the store boundary.
    pub fn new(id: GoalId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            date,
        }
    }
}

/// Exercises logged for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Unique key within the workout list.
    pub date: NaiveDate,
    pub exercises: Vec<String>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::{Goal, GoalId};
    use chrono::NaiveDate;

    #[test]
    fn generated_goal_ids_are_distinct() {
        assert_ne!(GoalId::generate(), GoalId::generate());
    }

    #[test]
    fn goal_serializes_with_plain_string_id_and_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let goal = Goal::new(GoalId::from("1717171717171"), "Read 10 pages", date);

        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["id"], "1717171717171");
        assert_eq!(json["date"], "2026-03-09");
        assert_eq!(json["completed"], false);
    }
}
