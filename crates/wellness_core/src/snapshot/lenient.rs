//! Field-by-field decoding of a migrated snapshot state.
//!
//! # Invariants
//! - A wrongly typed or out-of-range value never discards the snapshot:
//!   scalars are clamped or reset to their default, list items are dropped.
//! - Every such fix counts as one repair.

use super::SnapshotResult;
use crate::model::entry::{Goal, GratitudeEntry, MoodEntry, WorkoutEntry};
use crate::model::state::{
    BreakTimerState, Preferences, WaterLog, WellnessState, DEFAULT_BREAK_INTERVAL_MINUTES,
    DEFAULT_MOOD, DEFAULT_WATER_GOAL_ML,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawState {
    water_intake: Value,
    water_goal: Value,
    current_mood: Value,
    mood_history: Value,
    gratitude_entries: Value,
    goals: Value,
    last_break_time: Value,
    break_interval: Value,
    notifications: Value,
    relaxing_music: Value,
    eye_rest_reminders: Value,
    workout_entries: Value,
}

/// Builds a state from a migrated JSON object, returning it with the number
/// of values that had to be replaced or dropped.
///
/// A missing or unreadable `lastBreakTime` restarts the countdown at `now`.
pub(super) fn decode_state(
    value: Value,
    now: DateTime<Utc>,
) -> SnapshotResult<(WellnessState, usize)> {
    let raw: RawState = serde_json::from_value(value)?;
    let defaults = Preferences::default();
    let mut repairs = 0;

    let state = WellnessState {
        water: WaterLog {
            intake_ml: lenient_u32(&raw.water_intake, 0, &mut repairs),
            goal_ml: lenient_u32(&raw.water_goal, DEFAULT_WATER_GOAL_ML, &mut repairs),
        },
        current_mood: lenient_mood(&raw.current_mood, &mut repairs),
        mood_history: lenient_list::<MoodEntry>(raw.mood_history, &mut repairs),
        gratitude_entries: lenient_list::<GratitudeEntry>(raw.gratitude_entries, &mut repairs),
        goals: lenient_list::<Goal>(raw.goals, &mut repairs),
        break_timer: BreakTimerState {
            last_break_time: lenient_millis(&raw.last_break_time, now, &mut repairs),
            interval_minutes: lenient_u32(
                &raw.break_interval,
                DEFAULT_BREAK_INTERVAL_MINUTES,
                &mut repairs,
            ),
        },
        preferences: Preferences {
            notifications_enabled: lenient_bool(
                &raw.notifications,
                defaults.notifications_enabled,
                &mut repairs,
            ),
            relaxing_music_enabled: lenient_bool(
                &raw.relaxing_music,
                defaults.relaxing_music_enabled,
                &mut repairs,
            ),
            eye_rest_reminders: lenient_bool(
                &raw.eye_rest_reminders,
                defaults.eye_rest_reminders,
                &mut repairs,
            ),
        },
        workout_entries: lenient_list::<WorkoutEntry>(raw.workout_entries, &mut repairs),
    };

    Ok((state, repairs))
}

/// Negative and fractional numbers are clamped and rounded; non-numbers fall
/// back to `default`.
fn lenient_u32(value: &Value, default: u32, repairs: &mut usize) -> u32 {
    if let Some(exact) = value.as_u64().and_then(|n| u32::try_from(n).ok()) {
        return exact;
    }
    *repairs += 1;
    match value.as_f64() {
        Some(number) if number.is_finite() => {
            number.round().clamp(0.0, f64::from(u32::MAX)) as u32
        }
        _ => default,
    }
}

/// Range is checked later by `WellnessState::normalize`.
fn lenient_mood(value: &Value, repairs: &mut usize) -> u8 {
    match value.as_u64().and_then(|n| u8::try_from(n).ok()) {
        Some(mood) => mood,
        None => {
            *repairs += 1;
            DEFAULT_MOOD
        }
    }
}

fn lenient_bool(value: &Value, default: bool, repairs: &mut usize) -> bool {
    match value.as_bool() {
        Some(flag) => flag,
        None => {
            *repairs += 1;
            default
        }
    }
}

fn lenient_millis(value: &Value, now: DateTime<Utc>, repairs: &mut usize) -> DateTime<Utc> {
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|n| n.is_finite()).map(|n| n.round() as i64));
    match millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(at) if value.is_i64() || value.is_u64() => at,
        Some(at) => {
            *repairs += 1;
            at
        }
        None => {
            *repairs += 1;
            now
        }
    }
}

fn lenient_list<T: DeserializeOwned>(value: Value, repairs: &mut usize) -> Vec<T> {
    let Value::Array(items) = value else {
        *repairs += 1;
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                *repairs += 1;
                None
            }
        })
        .collect()
}
