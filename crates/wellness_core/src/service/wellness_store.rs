//! Wellness state owner.
//!
//! # Responsibility
//! - Own the current `WellnessState` for one session.
//! - Run every mutation as `transition::apply` followed by a commit to the
//!   snapshot repository.
//!
//! # Invariants
//! - In-memory state is authoritative; a failed save never rolls it back and
//!   never surfaces as a mutation error.
//! - Rejected mutations leave state untouched and persist nothing.
//! - Log lines carry counts and lengths only, never user text.

use super::transition::{apply, StoreResult, WellnessAction};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::model::entry::{GoalId, WorkoutEntry};
use crate::model::state::WellnessState;
use crate::repo::snapshot_repo::SnapshotRepository;
use chrono::NaiveDate;
use log::{debug, error, info, warn};

/// Injectable owner of the wellness aggregate.
pub struct WellnessStore<R: SnapshotRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    config: StoreConfig,
    state: WellnessState,
    last_save_error: Option<String>,
}

impl<R: SnapshotRepository> WellnessStore<R, SystemClock> {
    /// Opens a store on the system clock.
    pub fn open_with_system_clock(repo: R, config: StoreConfig) -> Self {
        Self::open(repo, SystemClock, config)
    }
}

impl<R: SnapshotRepository, C: Clock> WellnessStore<R, C> {
    /// Loads the last snapshot from `repo`, or starts from config defaults.
    ///
    /// Load failures are logged and treated as "no snapshot".
    pub fn open(repo: R, clock: C, config: StoreConfig) -> Self {
        let state = load_or_default(&repo, &clock, &config);
        Self {
            repo,
            clock,
            config,
            state,
            last_save_error: None,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &WellnessState {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Message of the most recent failed save, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Applies `action` and persists the resulting state.
    pub fn dispatch(&mut self, action: WellnessAction) -> StoreResult<()> {
        let name = action.name();
        match apply(&self.state, action, self.clock.now()) {
            Ok(next) => {
                self.state = next;
                debug!("event=store_mutation module=store status=ok action={name}");
                self.commit();
                Ok(())
            }
            Err(err) => {
                debug!("event=store_reject module=store status=error action={name} reason={err}");
                Err(err)
            }
        }
    }

    pub fn add_water(&mut self, amount_ml: u32) -> StoreResult<()> {
        self.dispatch(WellnessAction::AddWater { amount_ml })
    }

    pub fn set_water_goal(&mut self, goal_ml: u32) -> StoreResult<()> {
        self.dispatch(WellnessAction::SetWaterGoal { goal_ml })
    }

    pub fn set_mood(&mut self, mood: u8) -> StoreResult<()> {
        self.dispatch(WellnessAction::SetMood { mood })
    }

    pub fn add_gratitude_entry(&mut self, text: &str) -> StoreResult<()> {
        self.dispatch(WellnessAction::AddGratitudeEntry {
            text: text.to_string(),
        })
    }

    /// Adds an open goal and returns its freshly generated id.
    pub fn add_goal(&mut self, title: &str) -> StoreResult<GoalId> {
        let mut id = GoalId::generate();
        while self.state.goal(&id).is_some() {
            id = GoalId::generate();
        }
        self.dispatch(WellnessAction::AddGoal {
            id: id.clone(),
            title: title.to_string(),
        })?;
        Ok(id)
    }

    pub fn toggle_goal(&mut self, id: &GoalId) -> StoreResult<()> {
        self.dispatch(WellnessAction::ToggleGoal { id: id.clone() })
    }

    pub fn remove_goal(&mut self, id: &GoalId) -> StoreResult<()> {
        self.dispatch(WellnessAction::RemoveGoal { id: id.clone() })
    }

    /// Marks a break as taken now (completed or skipped).
    pub fn update_break_time(&mut self) -> StoreResult<()> {
        self.dispatch(WellnessAction::UpdateBreakTime)
    }

    pub fn set_break_interval(&mut self, minutes: u32) -> StoreResult<()> {
        self.dispatch(WellnessAction::SetBreakInterval { minutes })
    }

    pub fn toggle_notifications(&mut self) -> StoreResult<()> {
        self.dispatch(WellnessAction::ToggleNotifications)
    }

    pub fn toggle_music(&mut self) -> StoreResult<()> {
        self.dispatch(WellnessAction::ToggleMusic)
    }

    pub fn toggle_eye_rest_reminders(&mut self) -> StoreResult<()> {
        self.dispatch(WellnessAction::ToggleEyeRestReminders)
    }

    /// Upserts the workout for `date`; blank exercise names are dropped.
    pub fn add_workout_entry<S: AsRef<str>>(
        &mut self,
        date: NaiveDate,
        exercises: &[S],
        notes: &str,
    ) -> StoreResult<()> {
        self.dispatch(WellnessAction::AddWorkoutEntry {
            date,
            exercises: exercises
                .iter()
                .map(|exercise| exercise.as_ref().to_string())
                .collect(),
            notes: notes.to_string(),
        })
    }

    pub fn remove_workout_entry(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.dispatch(WellnessAction::RemoveWorkoutEntry { date })
    }

    pub fn get_workout_by_date(&self, date: NaiveDate) -> Option<&WorkoutEntry> {
        self.state.workout_for(date)
    }

    /// Replaces in-memory state with the persisted snapshot.
    pub fn reload(&mut self) {
        self.state = load_or_default(&self.repo, &self.clock, &self.config);
    }

    /// Deletes the persisted snapshot and resets to defaults.
    ///
    /// Returns `false` when the storage could not be cleared; state is reset
    /// either way.
    pub fn clear(&mut self) -> bool {
        self.state = default_state(&self.clock, &self.config);
        let storage_key = log_key(&self.repo);
        match self.repo.clear_snapshot() {
            Ok(()) => {
                info!("event=snapshot_clear module=store status=ok storage_key={storage_key}");
                self.last_save_error = None;
                true
            }
            Err(err) => {
                error!(
                    "event=snapshot_clear module=store status=error storage_key={storage_key} error={err}"
                );
                self.last_save_error = Some(err.to_string());
                false
            }
        }
    }

    /// Gives the repository back, e.g. to reopen a store on the same storage.
    pub fn into_repository(self) -> R {
        self.repo
    }

    fn commit(&mut self) {
        let storage_key = log_key(&self.repo);
        match self.repo.save_snapshot(&self.state) {
            Ok(()) => {
                debug!("event=snapshot_save module=store status=ok storage_key={storage_key}");
                self.last_save_error = None;
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=store status=error storage_key={storage_key} error={err}"
                );
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

fn default_state<C: Clock>(clock: &C, config: &StoreConfig) -> WellnessState {
    WellnessState::with_settings(
        clock.now(),
        config.water_goal_ml,
        config.break_interval_minutes,
    )
}

/// Logs name the key the repository is bound to; unkeyed backends log `memory`.
fn log_key<R: SnapshotRepository>(repo: &R) -> &str {
    repo.storage_key().unwrap_or("memory")
}

fn load_or_default<R: SnapshotRepository, C: Clock>(
    repo: &R,
    clock: &C,
    config: &StoreConfig,
) -> WellnessState {
    let storage_key = log_key(repo);
    match repo.load_snapshot() {
        Ok(Some(decoded)) => {
            if decoded.repairs > 0 {
                warn!(
                    "event=snapshot_load module=store status=repaired storage_key={storage_key} repairs={}",
                    decoded.repairs
                );
            }
            info!(
                "event=snapshot_load module=store status=ok storage_key={storage_key} stored_version={} goals={} workouts={}",
                decoded.stored_version,
                decoded.state.goals.len(),
                decoded.state.workout_entries.len()
            );
            decoded.state
        }
        Ok(None) => {
            info!("event=snapshot_load module=store status=empty storage_key={storage_key}");
            default_state(clock, config)
        }
        Err(err) => {
            error!(
                "event=snapshot_load module=store status=error storage_key={storage_key} error={err}"
            );
            default_state(clock, config)
        }
    }
}
