//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose wellness store operations to Dart via FRB.
//! - Flatten core types into plain, string-dated DTOs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the store, applies one operation, and persists it.
//! - Dates cross the boundary as `YYYY-MM-DD`, instants as epoch milliseconds.

use chrono::NaiveDate;
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use wellness_core::db::open_db;
use wellness_core::ui::dashboard::water_progress_pct;
use wellness_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    GoalId, SqliteSnapshotRepository, StoreConfig, StoreResult, WellnessState, WellnessStore,
    WorkoutEntry,
};

const WELLNESS_DB_FILE_NAME: &str = "wellness.sqlite3";
const ENV_DB_PATH: &str = "WELLNESS_DB_PATH";
const DATE_FORMAT: &str = "%Y-%m-%d";
static WELLNESS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Action response envelope for wellness mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellnessActionResponse {
    /// Whether the mutation was applied.
    pub ok: bool,
    /// Id of a goal created by this call.
    pub goal_id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl WellnessActionResponse {
    fn applied(message: impl Into<String>, save_error: Option<String>) -> Self {
        let message = match save_error {
            Some(err) => format!("{} Not saved: {err}", message.into()),
            None => message.into(),
        };
        Self {
            ok: true,
            goal_id: None,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            goal_id: None,
            message: message.into(),
        }
    }

    fn from_result(
        op: &str,
        message: &str,
        result: Result<((), Option<String>), String>,
    ) -> Self {
        match result {
            Ok(((), save_error)) => Self::applied(message, save_error),
            Err(err) => Self::failure(format!("{op} failed: {err}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodItem {
    pub date: String,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratitudeItem {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutItem {
    pub date: String,
    pub exercises: Vec<String>,
    pub notes: String,
}

/// Full state projection for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessView {
    pub water_intake_ml: u32,
    pub water_goal_ml: u32,
    pub water_progress_pct: f64,
    pub current_mood: u8,
    pub mood_history: Vec<MoodItem>,
    pub gratitude_entries: Vec<GratitudeItem>,
    pub goals: Vec<GoalItem>,
    pub last_break_epoch_ms: i64,
    pub break_interval_minutes: u32,
    pub notifications: bool,
    pub relaxing_music: bool,
    pub eye_rest_reminders: bool,
    pub workouts: Vec<WorkoutItem>,
}

/// Response envelope for state reads.
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessViewResponse {
    pub ok: bool,
    pub view: Option<WellnessView>,
    pub message: String,
}

/// Reads the persisted wellness state.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn wellness_view() -> WellnessViewResponse {
    match with_store(|store| Ok(to_view(store.state()))) {
        Ok((view, _)) => WellnessViewResponse {
            ok: true,
            view: Some(view),
            message: "Loaded.".to_string(),
        },
        Err(err) => WellnessViewResponse {
            ok: false,
            view: None,
            message: format!("wellness_view failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_water(amount_ml: u32) -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "add_water",
        "Water logged.",
        with_store(|store| store.add_water(amount_ml)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_water_goal(goal_ml: u32) -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "set_water_goal",
        "Water goal updated.",
        with_store(|store| store.set_water_goal(goal_ml)),
    )
}

/// Records today's mood (`1..=5`).
#[flutter_rust_bridge::frb(sync)]
pub fn set_mood(mood: u8) -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "set_mood",
        "Mood recorded.",
        with_store(|store| store.set_mood(mood)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_gratitude(text: String) -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "add_gratitude",
        "Gratitude saved.",
        with_store(|store| store.add_gratitude_entry(&text)),
    )
}

/// Creates a goal dated today.
///
/// # FFI contract
/// - Returns the created goal id in `goal_id` on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_goal(title: String) -> WellnessActionResponse {
    match with_store(|store| store.add_goal(&title)) {
        Ok((id, save_error)) => {
            let mut response = WellnessActionResponse::applied("Goal created.", save_error);
            response.goal_id = Some(id.to_string());
            response
        }
        Err(err) => WellnessActionResponse::failure(format!("add_goal failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_goal(goal_id: String) -> WellnessActionResponse {
    let id = GoalId::from(goal_id);
    WellnessActionResponse::from_result(
        "toggle_goal",
        "Goal updated.",
        with_store(|store| store.toggle_goal(&id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_goal(goal_id: String) -> WellnessActionResponse {
    let id = GoalId::from(goal_id);
    WellnessActionResponse::from_result(
        "remove_goal",
        "Goal removed.",
        with_store(|store| store.remove_goal(&id)),
    )
}

/// Marks a break as taken now; used for both completed and skipped breaks.
#[flutter_rust_bridge::frb(sync)]
pub fn complete_break() -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "complete_break",
        "Break recorded.",
        with_store(|store| store.update_break_time()),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_break_interval(minutes: u32) -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "set_break_interval",
        "Break interval updated.",
        with_store(|store| store.set_break_interval(minutes)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_notifications() -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "toggle_notifications",
        "Notifications toggled.",
        with_store(|store| store.toggle_notifications()),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_music() -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "toggle_music",
        "Relaxing music toggled.",
        with_store(|store| store.toggle_music()),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_eye_rest_reminders() -> WellnessActionResponse {
    WellnessActionResponse::from_result(
        "toggle_eye_rest_reminders",
        "Eye rest reminders toggled.",
        with_store(|store| store.toggle_eye_rest_reminders()),
    )
}

/// Saves (or replaces) the workout for `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn save_workout(
    date: String,
    exercises: Vec<String>,
    notes: String,
) -> WellnessActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(err) => return WellnessActionResponse::failure(format!("save_workout failed: {err}")),
    };
    WellnessActionResponse::from_result(
        "save_workout",
        "Workout saved.",
        with_store(|store| store.add_workout_entry(date, &exercises, &notes)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn remove_workout(date: String) -> WellnessActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(err) => {
            return WellnessActionResponse::failure(format!("remove_workout failed: {err}"))
        }
    };
    WellnessActionResponse::from_result(
        "remove_workout",
        "Workout removed.",
        with_store(|store| store.remove_workout_entry(date)),
    )
}

/// Workout logged for `date`, or `None` when absent or the date is malformed.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_for_date(date: String) -> Option<WorkoutItem> {
    let date = parse_date(&date).ok()?;
    match with_store(|store| Ok(store.get_workout_by_date(date).map(to_workout_item))) {
        Ok((item, _)) => item,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op=workout_for_date error={err}");
            None
        }
    }
}

/// Deletes all persisted wellness data and starts over from defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_wellness_data() -> WellnessActionResponse {
    match with_store(|store| Ok(store.clear())) {
        Ok((true, _)) => WellnessActionResponse::applied("Data cleared.", None),
        Ok((false, save_error)) => WellnessActionResponse::failure(format!(
            "reset_wellness_data failed: {}",
            save_error.unwrap_or_default()
        )),
        Err(err) => WellnessActionResponse::failure(format!("reset_wellness_data failed: {err}")),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD", raw.trim()))
}

fn resolve_wellness_db_path() -> PathBuf {
    WELLNESS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ENV_DB_PATH) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(WELLNESS_DB_FILE_NAME)
        })
        .clone()
}

/// Runs `f` against a store opened on the shared database.
///
/// Returns the operation output plus the save error, if persisting failed.
fn with_store<T>(
    f: impl FnOnce(&mut WellnessStore<SqliteSnapshotRepository<'_>>) -> StoreResult<T>,
) -> Result<(T, Option<String>), String> {
    let config = StoreConfig::from_env().map_err(|err| format!("config invalid: {err}"))?;
    let db_path = resolve_wellness_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("wellness DB open failed: {err}"))?;
    let repo = SqliteSnapshotRepository::try_new(&conn, &config.storage_key)
        .map_err(|err| format!("wellness repo init failed: {err}"))?;
    let mut store = WellnessStore::open_with_system_clock(repo, config);
    let output = f(&mut store).map_err(|err| err.to_string())?;
    let save_error = store.last_save_error().map(str::to_string);
    Ok((output, save_error))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn to_workout_item(entry: &WorkoutEntry) -> WorkoutItem {
    WorkoutItem {
        date: format_date(entry.date),
        exercises: entry.exercises.clone(),
        notes: entry.notes.clone(),
    }
}

fn to_view(state: &WellnessState) -> WellnessView {
    WellnessView {
        water_intake_ml: state.water.intake_ml,
        water_goal_ml: state.water.goal_ml,
        water_progress_pct: water_progress_pct(state),
        current_mood: state.current_mood,
        mood_history: state
            .mood_history
            .iter()
            .map(|entry| MoodItem {
                date: format_date(entry.date),
                mood: entry.mood,
            })
            .collect(),
        gratitude_entries: state
            .gratitude_entries
            .iter()
            .map(|entry| GratitudeItem {
                date: format_date(entry.date),
                text: entry.text.clone(),
            })
            .collect(),
        goals: state
            .goals
            .iter()
            .map(|goal| GoalItem {
                id: goal.id.to_string(),
                title: goal.title.clone(),
                completed: goal.completed,
                date: format_date(goal.date),
            })
            .collect(),
        last_break_epoch_ms: state.break_timer.last_break_time.timestamp_millis(),
        break_interval_minutes: state.break_timer.interval_minutes,
        notifications: state.preferences.notifications_enabled,
        relaxing_music: state.preferences.relaxing_music_enabled,
        eye_rest_reminders: state.preferences.eye_rest_reminders,
        workouts: state.workout_entries.iter().map(to_workout_item).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_goal, add_gratitude, add_water, complete_break, core_version, init_logging, ping,
        remove_goal, reset_wellness_data, save_workout, set_mood, toggle_goal, wellness_view,
        resolve_wellness_db_path, workout_for_date,
    };
    use chrono::Utc;
    use std::sync::{Mutex, MutexGuard};
    use std::time::{SystemTime, UNIX_EPOCH};
    use wellness_core::config::ENV_STORAGE_KEY;
    use wellness_core::{open_db, SnapshotRepository, SqliteSnapshotRepository, WellnessState};

    // Tests share one database file; each runs under its own storage key so the
    // default key is never read, written or cleared.
    static DB_LOCK: Mutex<()> = Mutex::new(());

    struct IsolatedStorageKey {
        _lock: MutexGuard<'static, ()>,
    }

    impl Drop for IsolatedStorageKey {
        fn drop(&mut self) {
            let _ = reset_wellness_data();
            std::env::remove_var(ENV_STORAGE_KEY);
        }
    }

    fn isolated_storage_key(prefix: &str) -> IsolatedStorageKey {
        let lock = DB_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::set_var(ENV_STORAGE_KEY, unique_token(prefix));
        IsolatedStorageKey { _lock: lock }
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn water_and_mood_round_trip_through_storage() {
        let _key = isolated_storage_key("ffi-water");

        assert!(add_water(250).ok);
        assert!(add_water(500).ok);
        assert!(set_mood(3).ok);
        let rejected = set_mood(9);
        assert!(!rejected.ok);
        assert!(rejected.message.starts_with("set_mood failed"));

        let view = wellness_view().view.unwrap();
        assert_eq!(view.water_intake_ml, 750);
        assert_eq!(view.water_goal_ml, 2000);
        assert_eq!(view.current_mood, 3);
        assert_eq!(view.mood_history.len(), 1);
    }

    #[test]
    fn goal_lifecycle_uses_returned_id() {
        let _key = isolated_storage_key("ffi-goal");

        let created = add_goal("  Drink more tea ".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.goal_id.unwrap();

        assert!(toggle_goal(id.clone()).ok);
        let view = wellness_view().view.unwrap();
        assert_eq!(view.goals.len(), 1);
        assert_eq!(view.goals[0].title, "Drink more tea");
        assert!(view.goals[0].completed);

        assert!(remove_goal(id.clone()).ok);
        assert!(!toggle_goal(id).ok);
        assert!(wellness_view().view.unwrap().goals.is_empty());
    }

    #[test]
    fn workouts_are_keyed_by_date() {
        let _key = isolated_storage_key("ffi-workout");

        let saved = save_workout(
            "2026-03-02".to_string(),
            vec!["Running".to_string(), " ".to_string()],
            "easy pace".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);

        let item = workout_for_date("2026-03-02".to_string()).unwrap();
        assert_eq!(item.exercises, vec!["Running".to_string()]);
        assert_eq!(item.notes, "easy pace");
        assert!(workout_for_date("2026-03-03".to_string()).is_none());
        assert!(workout_for_date("March 2".to_string()).is_none());

        let bad = save_workout("02/03/2026".to_string(), vec!["Yoga".to_string()], String::new());
        assert!(!bad.ok);
        assert!(bad.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn gratitude_and_break_updates_persist() {
        let _key = isolated_storage_key("ffi-gratitude");

        let before = wellness_view().view.unwrap().last_break_epoch_ms;
        assert!(add_gratitude("sunny walk".to_string()).ok);
        assert!(!add_gratitude("   ".to_string()).ok);
        assert!(complete_break().ok);

        let view = wellness_view().view.unwrap();
        assert_eq!(view.gratitude_entries.len(), 1);
        assert_eq!(view.gratitude_entries[0].text, "sunny walk");
        assert!(view.last_break_epoch_ms >= before);
    }

    #[test]
    fn resetting_under_a_test_key_keeps_other_snapshots() {
        let conn = open_db(resolve_wellness_db_path()).unwrap();
        let bystander_key = unique_token("ffi-bystander");
        let bystander = SqliteSnapshotRepository::try_new(&conn, &bystander_key).unwrap();
        let mut state = WellnessState::new(Utc::now());
        state.water.intake_ml = 900;
        bystander.save_snapshot(&state).unwrap();

        {
            let _key = isolated_storage_key("ffi-reset");
            assert!(add_water(100).ok);
            assert!(reset_wellness_data().ok);
        }

        let kept = bystander.load_snapshot().unwrap().unwrap();
        assert_eq!(kept.state.water.intake_ml, 900);
        bystander.clear_snapshot().unwrap();
    }
}
