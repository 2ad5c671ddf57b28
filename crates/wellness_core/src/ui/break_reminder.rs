//! Break reminder widget.
//!
//! # Responsibility
//! - Derive the countdown to the next break from persisted break-timer state.
//! - Run one guided break at a time and report completion to the store.
//!
//! # Invariants
//! - The countdown itself is never persisted; it is recomputed from
//!   `last_break_time` on every tick.
//! - At most one break session timer is active.

use super::timer::{TimerMode, TimerSlot};
use crate::clock::Clock;
use crate::model::state::WellnessState;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::service::transition::StoreResult;
use crate::service::wellness_store::WellnessStore;
use chrono::{DateTime, Duration, Utc};

/// Guided break flavours offered when a break is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Stretch,
    Eyes,
    Breathing,
}

impl BreakKind {
    pub const ALL: [BreakKind; 3] = [Self::Stretch, Self::Eyes, Self::Breathing];

    pub fn duration(self) -> Duration {
        match self {
            Self::Stretch => Duration::minutes(5),
            Self::Eyes => Duration::seconds(20),
            Self::Breathing => Duration::minutes(3),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stretch => "Stretching",
            Self::Eyes => "Eye rest",
            Self::Breathing => "Guided breathing",
        }
    }

    pub fn steps(self) -> &'static [&'static str] {
        match self {
            Self::Stretch => &[
                "Reach both arms above your head",
                "Roll your shoulders back five times",
                "Tilt your head gently to each side",
                "Stretch your legs out under the desk",
                "Slowly circle your neck",
            ],
            Self::Eyes => &[
                "Look at a distant point for 20 seconds",
                "Blink deliberately 20 times",
                "Close your eyes and relax",
            ],
            Self::Breathing => &[
                "Breathe in deeply for 4 seconds",
                "Hold your breath for 4 seconds",
                "Breathe out slowly for 6 seconds",
                "Repeat the cycle calmly",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPhase {
    /// Waiting for the interval to elapse.
    Counting,
    /// Break is due (or was requested); the user picks a kind or skips.
    Prompting,
    Active {
        kind: BreakKind,
        started_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakEvent {
    PromptOpened,
    Completed(BreakKind),
}

/// Time left until the next break is due, floored at zero.
pub fn time_until_break(state: &WellnessState, now: DateTime<Utc>) -> Duration {
    let interval = Duration::minutes(i64::from(state.break_timer.interval_minutes));
    let elapsed = now - state.break_timer.last_break_time;
    (interval - elapsed).max(Duration::zero())
}

/// Share of the interval already elapsed, in `0.0..=100.0`.
pub fn break_progress_pct(state: &WellnessState, now: DateTime<Utc>) -> f64 {
    let interval_ms = i64::from(state.break_timer.interval_minutes) * 60_000;
    if interval_ms == 0 {
        return 100.0;
    }
    let remaining_ms = time_until_break(state, now).num_milliseconds();
    (100.0 - remaining_ms as f64 / interval_ms as f64 * 100.0).clamp(0.0, 100.0)
}

/// Formats a countdown as `m:ss`; negative durations render as `0:00`.
pub fn format_countdown(remaining: Duration) -> String {
    let total_secs = remaining.num_seconds().max(0);
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[derive(Debug, Clone)]
pub struct BreakReminder {
    phase: BreakPhase,
    session: TimerSlot,
}

impl Default for BreakReminder {
    fn default() -> Self {
        Self {
            phase: BreakPhase::Counting,
            session: TimerSlot::new(),
        }
    }
}

impl BreakReminder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BreakPhase {
        self.phase
    }

    /// Advances the widget. Completing a session records the break.
    pub fn tick<R: SnapshotRepository, C: Clock>(
        &mut self,
        store: &mut WellnessStore<R, C>,
    ) -> StoreResult<Option<BreakEvent>> {
        let now = store.clock().now();
        match self.phase {
            BreakPhase::Counting => {
                if time_until_break(store.state(), now) == Duration::zero() {
                    self.phase = BreakPhase::Prompting;
                    return Ok(Some(BreakEvent::PromptOpened));
                }
                Ok(None)
            }
            BreakPhase::Prompting => Ok(None),
            BreakPhase::Active { kind, .. } => {
                if self.session.poll(now).is_none() {
                    return Ok(None);
                }
                self.phase = BreakPhase::Counting;
                store.update_break_time()?;
                Ok(Some(BreakEvent::Completed(kind)))
            }
        }
    }

    /// Opens the prompt early. Ignored while a break is running.
    pub fn open_prompt(&mut self) {
        if !matches!(self.phase, BreakPhase::Active { .. }) {
            self.phase = BreakPhase::Prompting;
        }
    }

    /// Starts a guided break, replacing any running one.
    pub fn start_break(&mut self, kind: BreakKind, now: DateTime<Utc>) {
        self.session.start(TimerMode::Once, kind.duration(), now);
        self.phase = BreakPhase::Active {
            kind,
            started_at: now,
        };
    }

    /// Time left in the running break, if any.
    pub fn remaining_in_break(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.phase {
            BreakPhase::Active { .. } => self.session.remaining(now),
            _ => None,
        }
    }

    /// Dismisses the prompt or aborts the running break; counts as a break.
    pub fn skip<R: SnapshotRepository, C: Clock>(
        &mut self,
        store: &mut WellnessStore<R, C>,
    ) -> StoreResult<()> {
        self.session.cancel();
        self.phase = BreakPhase::Counting;
        store.update_break_time()
    }
}

#[cfg(test)]
mod tests {
    use super::{break_progress_pct, format_countdown, time_until_break};
    use crate::model::state::WellnessState;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn countdown_and_progress_follow_last_break() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let state = WellnessState::new(t0);

        let now = t0 + Duration::minutes(15);
        assert_eq!(time_until_break(&state, now), Duration::minutes(45));
        assert!((break_progress_pct(&state, now) - 25.0).abs() < 1e-9);

        let overdue = t0 + Duration::minutes(90);
        assert_eq!(time_until_break(&state, overdue), Duration::zero());
        assert_eq!(break_progress_pct(&state, overdue), 100.0);
    }

    #[test]
    fn countdown_formats_minutes_and_padded_seconds() {
        assert_eq!(format_countdown(Duration::seconds(65)), "1:05");
        assert_eq!(format_countdown(Duration::minutes(60)), "60:00");
        assert_eq!(format_countdown(Duration::seconds(-3)), "0:00");
    }
}
