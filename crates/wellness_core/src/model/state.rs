//! `WellnessState` aggregate.
//!
//! # Responsibility
//! - Hold every user-logged wellness field in one serializable record.
//! - Repair persisted data that violates aggregate invariants.
//!
//! # Invariants
//! - `water.intake_ml <= water.goal_ml`.
//! - `mood_history.len() <= MOOD_HISTORY_LIMIT`, oldest first.
//! - `gratitude_entries.len() <= GRATITUDE_HISTORY_LIMIT`, newest first.
//! - Goal ids are unique; workout dates are unique.

use super::entry::{Goal, GratitudeEntry, MoodEntry, WorkoutEntry};
use super::validation::{
    normalize_exercises, normalize_text, validate_break_interval, validate_mood,
    GOAL_TITLE_MAX_CHARS, GRATITUDE_TEXT_MAX_CHARS,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MOOD_HISTORY_LIMIT: usize = 7;
pub const GRATITUDE_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_WATER_GOAL_ML: u32 = 2000;
pub const DEFAULT_BREAK_INTERVAL_MINUTES: u32 = 60;
pub const DEFAULT_MOOD: u8 = 5;

/// Daily water intake against its goal, both in millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    #[serde(rename = "waterIntake")]
    pub intake_ml: u32,
    #[serde(rename = "waterGoal")]
    pub goal_ml: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakTimerState {
    /// Serialized as epoch milliseconds.
    #[serde(rename = "lastBreakTime", with = "chrono::serde::ts_milliseconds")]
    pub last_break_time: DateTime<Utc>,
    #[serde(rename = "breakInterval")]
    pub interval_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "notifications")]
    pub notifications_enabled: bool,
    #[serde(rename = "relaxingMusic")]
    pub relaxing_music_enabled: bool,
    #[serde(rename = "eyeRestReminders")]
    pub eye_rest_reminders: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            relaxing_music_enabled: false,
            eye_rest_reminders: true,
        }
    }
}

/// The single aggregate holding all wellness data of one user.
///
/// Nested records are flattened so the wire shape stays one flat object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessState {
    #[serde(flatten)]
    pub water: WaterLog,
    pub current_mood: u8,
    pub mood_history: Vec<MoodEntry>,
    pub gratitude_entries: Vec<GratitudeEntry>,
    pub goals: Vec<Goal>,
    #[serde(flatten)]
    pub break_timer: BreakTimerState,
    #[serde(flatten)]
    pub preferences: Preferences,
    pub workout_entries: Vec<WorkoutEntry>,
}

impl WellnessState {
    /// Creates the initial state with built-in defaults.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_settings(now, DEFAULT_WATER_GOAL_ML, DEFAULT_BREAK_INTERVAL_MINUTES)
    }

    /// Creates the initial state with operator-provided goal and interval.
    pub fn with_settings(
        now: DateTime<Utc>,
        water_goal_ml: u32,
        break_interval_minutes: u32,
    ) -> Self {
        Self {
            water: WaterLog {
                intake_ml: 0,
                goal_ml: water_goal_ml,
            },
            current_mood: DEFAULT_MOOD,
            mood_history: Vec::new(),
            gratitude_entries: Vec::new(),
            goals: Vec::new(),
            break_timer: BreakTimerState {
                last_break_time: now,
                interval_minutes: break_interval_minutes,
            },
            preferences: Preferences::default(),
            workout_entries: Vec::new(),
        }
    }

    pub fn goal(&self, id: &super::entry::GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| &goal.id == id)
    }

    pub fn workout_for(&self, date: NaiveDate) -> Option<&WorkoutEntry> {
        self.workout_entries.iter().find(|entry| entry.date == date)
    }

    /// Repairs invariant violations in persisted data.
    ///
    /// Returns the number of repairs applied; `0` means the state was valid.
    pub fn normalize(&mut self) -> usize {
        let mut repairs = 0;

        if self.water.goal_ml == 0 {
            self.water.goal_ml = DEFAULT_WATER_GOAL_ML;
            repairs += 1;
        }
        if self.water.intake_ml > self.water.goal_ml {
            self.water.intake_ml = self.water.goal_ml;
            repairs += 1;
        }

        if validate_mood(self.current_mood).is_err() {
            self.current_mood = DEFAULT_MOOD;
            repairs += 1;
        }
        let before = self.mood_history.len();
        self.mood_history
            .retain(|entry| validate_mood(entry.mood).is_ok());
        if self.mood_history.len() > MOOD_HISTORY_LIMIT {
            let overflow = self.mood_history.len() - MOOD_HISTORY_LIMIT;
            self.mood_history.drain(..overflow);
        }
        repairs += before - self.mood_history.len();

        let before = self.gratitude_entries.len();
        self.gratitude_entries.retain_mut(|entry| {
            match normalize_text("gratitude text", &entry.text, GRATITUDE_TEXT_MAX_CHARS) {
                Ok(text) => {
                    if text != entry.text {
                        entry.text = text;
                        repairs += 1;
                    }
                    true
                }
                Err(_) => false,
            }
        });
        self.gratitude_entries.truncate(GRATITUDE_HISTORY_LIMIT);
        repairs += before - self.gratitude_entries.len();

        let before = self.goals.len();
        let mut seen_ids = HashSet::new();
        self.goals.retain_mut(|goal| {
            let Ok(title) = normalize_text("goal title", &goal.title, GOAL_TITLE_MAX_CHARS) else {
                return false;
            };
            if title != goal.title {
                goal.title = title;
                repairs += 1;
            }
            seen_ids.insert(goal.id.clone())
        });
        repairs += before - self.goals.len();

        let before = self.workout_entries.len();
        let mut deduped: Vec<WorkoutEntry> = Vec::with_capacity(before);
        for mut entry in self.workout_entries.drain(..) {
            let exercises = normalize_exercises(&entry.exercises);
            if exercises.is_empty() {
                continue;
            }
            if exercises != entry.exercises {
                entry.exercises = exercises;
                repairs += 1;
            }
            match deduped.iter_mut().find(|kept| kept.date == entry.date) {
                Some(kept) => *kept = entry,
                None => deduped.push(entry),
            }
        }
        self.workout_entries = deduped;
        repairs += before - self.workout_entries.len();

        if validate_break_interval(self.break_timer.interval_minutes).is_err() {
            self.break_timer.interval_minutes = DEFAULT_BREAK_INTERVAL_MINUTES;
            repairs += 1;
        }

        repairs
    }
}
