//! Read-only projections rendered by the dashboard cards.

use crate::model::entry::WorkoutEntry;
use crate::model::state::WellnessState;
use chrono::{Datelike, NaiveDate};

/// Quick-add buttons on the water card, in millilitres.
pub const WATER_QUICK_AMOUNTS_ML: [u32; 3] = [250, 500, 750];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Morning before 12h, afternoon before 18h, evening otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodLevel {
    pub value: u8,
    pub emoji: &'static str,
    pub label: &'static str,
}

pub const MOOD_SCALE: [MoodLevel; 5] = [
    MoodLevel {
        value: 1,
        emoji: "😢",
        label: "Very sad",
    },
    MoodLevel {
        value: 2,
        emoji: "😞",
        label: "Sad",
    },
    MoodLevel {
        value: 3,
        emoji: "😐",
        label: "Neutral",
    },
    MoodLevel {
        value: 4,
        emoji: "😊",
        label: "Good",
    },
    MoodLevel {
        value: 5,
        emoji: "😄",
        label: "Very good",
    },
];

pub fn mood_level(value: u8) -> Option<MoodLevel> {
    MOOD_SCALE.iter().copied().find(|level| level.value == value)
}

/// Percentage of the daily water goal reached, capped at 100.
pub fn water_progress_pct(state: &WellnessState) -> f64 {
    if state.water.goal_ml == 0 {
        return 0.0;
    }
    (f64::from(state.water.intake_ml) / f64::from(state.water.goal_ml) * 100.0).min(100.0)
}

/// Average of the mood history, or the current mood when history is empty.
pub fn average_mood(state: &WellnessState) -> f64 {
    if state.mood_history.is_empty() {
        return f64::from(state.current_mood);
    }
    let sum: u32 = state
        .mood_history
        .iter()
        .map(|entry| u32::from(entry.mood))
        .sum();
    f64::from(sum) / state.mood_history.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub completed: usize,
    pub total: usize,
    /// `0.0` when there are no goals.
    pub completion_pct: f64,
}

pub fn goal_progress(state: &WellnessState) -> GoalProgress {
    let total = state.goals.len();
    let completed = state.goals.iter().filter(|goal| goal.completed).count();
    let completion_pct = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    GoalProgress {
        completed,
        total,
        completion_pct,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub workout: Option<&'a WorkoutEntry>,
}

impl CalendarDay<'_> {
    pub fn has_workout(&self) -> bool {
        self.workout.is_some()
    }
}

/// Every day of `year-month` paired with its logged workout.
///
/// Returns an empty list for an invalid month.
pub fn workout_month(state: &WellnessState, year: i32, month: u32) -> Vec<CalendarDay<'_>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| CalendarDay {
            date,
            workout: state.workout_for(date),
        })
        .collect()
}
