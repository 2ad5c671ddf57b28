//! Pure state transitions for `WellnessState`.
//!
//! # Responsibility
//! - Map (current state, action, now) to the next state, or reject the action.
//! - Stay free of storage, logging and clock access so every rule is testable
//!   on plain values.
//!
//! # Invariants
//! - A rejected action never yields a partially updated state.
//! - "Today" is the UTC calendar day of `now`.

use crate::model::entry::{Goal, GoalId, GratitudeEntry, MoodEntry, WorkoutEntry};
use crate::model::state::{WellnessState, GRATITUDE_HISTORY_LIMIT, MOOD_HISTORY_LIMIT};
use crate::model::validation::{
    normalize_exercises, normalize_text, validate_break_interval, validate_mood, InputError,
    GOAL_TITLE_MAX_CHARS, GRATITUDE_TEXT_MAX_CHARS,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejection returned by a store mutation. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidInput(InputError),
    GoalNotFound(GoalId),
    /// Goal ids are unique; an `AddGoal` reusing one is refused.
    DuplicateGoalId(GoalId),
    WorkoutNotFound(NaiveDate),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::DuplicateGoalId(id) => write!(f, "goal id already exists: {id}"),
            Self::WorkoutNotFound(date) => write!(f, "no workout logged on {date}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InputError> for StoreError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellnessAction {
    AddWater { amount_ml: u32 },
    SetWaterGoal { goal_ml: u32 },
    SetMood { mood: u8 },
    AddGratitudeEntry { text: String },
    /// `id` is generated by the caller so the transition stays deterministic.
    AddGoal { id: GoalId, title: String },
    ToggleGoal { id: GoalId },
    RemoveGoal { id: GoalId },
    UpdateBreakTime,
    SetBreakInterval { minutes: u32 },
    ToggleNotifications,
    ToggleMusic,
    ToggleEyeRestReminders,
    AddWorkoutEntry {
        date: NaiveDate,
        exercises: Vec<String>,
        notes: String,
    },
    RemoveWorkoutEntry { date: NaiveDate },
}

impl WellnessAction {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddWater { .. } => "add_water",
            Self::SetWaterGoal { .. } => "set_water_goal",
            Self::SetMood { .. } => "set_mood",
            Self::AddGratitudeEntry { .. } => "add_gratitude_entry",
            Self::AddGoal { .. } => "add_goal",
            Self::ToggleGoal { .. } => "toggle_goal",
            Self::RemoveGoal { .. } => "remove_goal",
            Self::UpdateBreakTime => "update_break_time",
            Self::SetBreakInterval { .. } => "set_break_interval",
            Self::ToggleNotifications => "toggle_notifications",
            Self::ToggleMusic => "toggle_music",
            Self::ToggleEyeRestReminders => "toggle_eye_rest_reminders",
            Self::AddWorkoutEntry { .. } => "add_workout_entry",
            Self::RemoveWorkoutEntry { .. } => "remove_workout_entry",
        }
    }
}

/// Computes the state that results from applying `action` at `now`.
pub fn apply(
    state: &WellnessState,
    action: WellnessAction,
    now: DateTime<Utc>,
) -> StoreResult<WellnessState> {
    let today = now.date_naive();
    let mut next = state.clone();

    match action {
        WellnessAction::AddWater { amount_ml } => {
            if amount_ml == 0 {
                return Err(InputError::ZeroWaterAmount.into());
            }
            next.water.intake_ml = next
                .water
                .intake_ml
                .saturating_add(amount_ml)
                .min(next.water.goal_ml);
        }
        WellnessAction::SetWaterGoal { goal_ml } => {
            if goal_ml == 0 {
                return Err(InputError::ZeroWaterGoal.into());
            }
            next.water.goal_ml = goal_ml;
            next.water.intake_ml = next.water.intake_ml.min(goal_ml);
        }
        WellnessAction::SetMood { mood } => {
            let mood = validate_mood(mood)?;
            next.current_mood = mood;
            next.mood_history.push(MoodEntry { date: today, mood });
            if next.mood_history.len() > MOOD_HISTORY_LIMIT {
                let overflow = next.mood_history.len() - MOOD_HISTORY_LIMIT;
                next.mood_history.drain(..overflow);
            }
        }
        WellnessAction::AddGratitudeEntry { text } => {
            let text = normalize_text("gratitude text", &text, GRATITUDE_TEXT_MAX_CHARS)?;
            next.gratitude_entries
                .insert(0, GratitudeEntry { date: today, text });
            next.gratitude_entries.truncate(GRATITUDE_HISTORY_LIMIT);
        }
        WellnessAction::AddGoal { id, title } => {
            if next.goal(&id).is_some() {
                return Err(StoreError::DuplicateGoalId(id));
            }
            let title = normalize_text("goal title", &title, GOAL_TITLE_MAX_CHARS)?;
            next.goals.push(Goal::new(id, title, today));
        }
        WellnessAction::ToggleGoal { id } => {
            let goal = next
                .goals
                .iter_mut()
                .find(|goal| goal.id == id)
                .ok_or_else(|| StoreError::GoalNotFound(id.clone()))?;
            goal.completed = !goal.completed;
        }
        WellnessAction::RemoveGoal { id } => {
            let position = next
                .goals
                .iter()
                .position(|goal| goal.id == id)
                .ok_or(StoreError::GoalNotFound(id))?;
            next.goals.remove(position);
        }
        WellnessAction::UpdateBreakTime => {
            next.break_timer.last_break_time = now;
        }
        WellnessAction::SetBreakInterval { minutes } => {
            next.break_timer.interval_minutes = validate_break_interval(minutes)?;
        }
        WellnessAction::ToggleNotifications => {
            next.preferences.notifications_enabled = !next.preferences.notifications_enabled;
        }
        WellnessAction::ToggleMusic => {
            next.preferences.relaxing_music_enabled = !next.preferences.relaxing_music_enabled;
        }
        WellnessAction::ToggleEyeRestReminders => {
            next.preferences.eye_rest_reminders = !next.preferences.eye_rest_reminders;
        }
        WellnessAction::AddWorkoutEntry {
            date,
            exercises,
            notes,
        } => {
            let exercises = normalize_exercises(&exercises);
            if exercises.is_empty() {
                return Err(InputError::NoExercises.into());
            }
            match next
                .workout_entries
                .iter_mut()
                .find(|entry| entry.date == date)
            {
                Some(existing) => {
                    existing.exercises = exercises;
                    existing.notes = notes;
                }
                None => next.workout_entries.push(WorkoutEntry {
                    date,
                    exercises,
                    notes,
                }),
            }
        }
        WellnessAction::RemoveWorkoutEntry { date } => {
            let position = next
                .workout_entries
                .iter()
                .position(|entry| entry.date == date)
                .ok_or(StoreError::WorkoutNotFound(date))?;
            next.workout_entries.remove(position);
        }
    }

    Ok(next)
}
