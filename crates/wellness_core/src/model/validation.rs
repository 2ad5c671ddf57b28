//! Input validation for wellness mutations.
//!
//! # Invariants
//! - Text inputs are trimmed before any length check.
//! - Length limits count Unicode scalar values, not bytes.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted mood score.
pub const MOOD_MIN: u8 = 1;
/// Highest accepted mood score.
pub const MOOD_MAX: u8 = 5;
/// Maximum gratitude entry length after trimming.
pub const GRATITUDE_TEXT_MAX_CHARS: usize = 200;
/// Maximum goal title length after trimming.
pub const GOAL_TITLE_MAX_CHARS: usize = 100;
/// Accepted break interval range in minutes.
pub const BREAK_INTERVAL_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=480;

/// Caller-side input rejected at the mutation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Text is empty after trimming.
    EmptyText { field: &'static str },
    /// Text exceeds its character budget after trimming.
    TextTooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Mood score outside `MOOD_MIN..=MOOD_MAX`.
    MoodOutOfRange(u8),
    /// Water amount must be positive.
    ZeroWaterAmount,
    /// Water goal must be positive.
    ZeroWaterGoal,
    /// Break interval outside `BREAK_INTERVAL_MINUTES_RANGE`.
    BreakIntervalOutOfRange(u32),
    /// Workout has no exercise left after dropping blank names.
    NoExercises,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText { field } => write!(f, "{field} must not be empty"),
            Self::TextTooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field} must be at most {max_chars} characters, got {actual_chars}"
            ),
            Self::MoodOutOfRange(value) => write!(
                f,
                "mood must be within {MOOD_MIN}..={MOOD_MAX}, got {value}"
            ),
            Self::ZeroWaterAmount => write!(f, "water amount must be greater than zero"),
            Self::ZeroWaterGoal => write!(f, "water goal must be greater than zero"),
            Self::BreakIntervalOutOfRange(value) => write!(
                f,
                "break interval must be within {}..={} minutes, got {value}",
                BREAK_INTERVAL_MINUTES_RANGE.start(),
                BREAK_INTERVAL_MINUTES_RANGE.end()
            ),
            Self::NoExercises => write!(f, "workout needs at least one exercise"),
        }
    }
}

impl Error for InputError {}

/// Trims `value` and checks it is non-empty and within `max_chars`.
///
/// Returns the trimmed text on success.
pub fn normalize_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyText { field });
    }
    let actual_chars = trimmed.chars().count();
    if actual_chars > max_chars {
        return Err(InputError::TextTooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(trimmed.to_string())
}

pub fn validate_mood(mood: u8) -> Result<u8, InputError> {
    if (MOOD_MIN..=MOOD_MAX).contains(&mood) {
        Ok(mood)
    } else {
        Err(InputError::MoodOutOfRange(mood))
    }
}

pub fn validate_break_interval(minutes: u32) -> Result<u32, InputError> {
    if BREAK_INTERVAL_MINUTES_RANGE.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(InputError::BreakIntervalOutOfRange(minutes))
    }
}

/// Drops blank exercise names and trims the rest, keeping order.
pub fn normalize_exercises<S: AsRef<str>>(exercises: &[S]) -> Vec<String> {
    exercises
        .iter()
        .map(|exercise| exercise.as_ref().trim())
        .filter(|exercise| !exercise.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_exercises, normalize_text, validate_mood, InputError};

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("title", "  run 5k ", 100).unwrap(), "run 5k");
        assert_eq!(
            normalize_text("title", "   ", 100).unwrap_err(),
            InputError::EmptyText { field: "title" }
        );
    }

    #[test]
    fn normalize_text_counts_chars_not_bytes() {
        let accented = "é".repeat(10);
        assert!(normalize_text("text", &accented, 10).is_ok());
        let err = normalize_text("text", &format!("{accented}é"), 10).unwrap_err();
        assert!(matches!(
            err,
            InputError::TextTooLong {
                actual_chars: 11,
                ..
            }
        ));
    }

    #[test]
    fn mood_bounds_are_inclusive() {
        assert!(validate_mood(1).is_ok());
        assert!(validate_mood(5).is_ok());
        assert_eq!(validate_mood(0), Err(InputError::MoodOutOfRange(0)));
        assert_eq!(validate_mood(6), Err(InputError::MoodOutOfRange(6)));
    }

    #[test]
    fn exercises_keep_order_and_drop_blanks() {
        let cleaned = normalize_exercises(&["Run", "  ", "", " Swim "]);
        assert_eq!(cleaned, vec!["Run".to_string(), "Swim".to_string()]);
    }
}
