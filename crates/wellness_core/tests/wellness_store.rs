use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use wellness_core::db::open_db;
use wellness_core::{
    DecodedSnapshot, FixedClock, GoalId, InMemorySnapshotRepository, InputError, RepoError,
    RepoResult, SnapshotError, SnapshotRepository, SqliteSnapshotRepository, StoreConfig,
    StoreError, WellnessAction, WellnessState, WellnessStore,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 8, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
}

fn memory_store(
    clock: &FixedClock,
) -> WellnessStore<InMemorySnapshotRepository, &FixedClock> {
    WellnessStore::open(
        InMemorySnapshotRepository::new(),
        clock,
        StoreConfig::default(),
    )
}

#[test]
fn empty_storage_starts_from_defaults() {
    let clock = FixedClock::new(t0());
    let store = memory_store(&clock);

    assert_eq!(store.state(), &WellnessState::new(t0()));
    assert!(store.last_save_error().is_none());
}

#[test]
fn config_overrides_apply_to_fresh_state_only() {
    let clock = FixedClock::new(t0());
    let config = StoreConfig {
        water_goal_ml: 2500,
        break_interval_minutes: 45,
        ..StoreConfig::default()
    };
    let mut store = WellnessStore::open(InMemorySnapshotRepository::new(), &clock, config);
    assert_eq!(store.state().water.goal_ml, 2500);
    assert_eq!(store.state().break_timer.interval_minutes, 45);

    store.set_water_goal(1800).unwrap();
    let repo = store.into_repository();
    let reopened = WellnessStore::open(
        repo,
        &clock,
        StoreConfig {
            water_goal_ml: 3000,
            ..StoreConfig::default()
        },
    );
    assert_eq!(reopened.state().water.goal_ml, 1800);
}

#[test]
fn hydration_scenario_clamps_at_goal() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    for amount in [250, 500, 750, 750] {
        store.add_water(amount).unwrap();
    }
    assert_eq!(store.state().water.intake_ml, 2000);

    assert_eq!(
        store.add_water(0).unwrap_err(),
        StoreError::InvalidInput(InputError::ZeroWaterAmount)
    );
}

#[test]
fn goal_scenario_create_toggle_remove() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    let first = store.add_goal("Walk 10k steps").unwrap();
    let second = store.add_goal("Read 20 pages").unwrap();
    assert_ne!(first, second);

    store.toggle_goal(&first).unwrap();
    store.toggle_goal(&first).unwrap();
    store.toggle_goal(&second).unwrap();
    assert!(!store.state().goal(&first).unwrap().completed);
    assert!(store.state().goal(&second).unwrap().completed);
    assert_eq!(store.state().goals[0].date, day(15));

    store.remove_goal(&first).unwrap();
    assert_eq!(store.state().goals.len(), 1);

    let missing = GoalId::from("does-not-exist");
    let before = store.state().clone();
    assert_eq!(
        store.toggle_goal(&missing).unwrap_err(),
        StoreError::GoalNotFound(missing.clone())
    );
    assert_eq!(store.remove_goal(&missing).unwrap_err(), StoreError::GoalNotFound(missing));
    assert_eq!(store.state(), &before);
}

#[test]
fn dispatching_a_reused_goal_id_is_rejected() {
    let clock = FixedClock::new(t0());
    let repo = InMemorySnapshotRepository::new();
    let mut store = WellnessStore::open(&repo, &clock, StoreConfig::default());

    let id = store.add_goal("first").unwrap();
    let err = store
        .dispatch(WellnessAction::AddGoal {
            id: id.clone(),
            title: "second".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateGoalId(id.clone()));
    assert_eq!(store.state().goals.len(), 1);

    store.toggle_goal(&id).unwrap();
    store.reload();
    assert_eq!(store.state().goals.len(), 1);
    assert!(store.state().goal(&id).unwrap().completed);
}

#[test]
fn empty_goal_title_leaves_goals_unchanged() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);
    store.add_goal("keep").unwrap();

    assert!(matches!(
        store.add_goal("").unwrap_err(),
        StoreError::InvalidInput(InputError::EmptyText { .. })
    ));
    assert_eq!(store.state().goals.len(), 1);
}

#[test]
fn rejected_goal_title_does_not_persist() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    assert!(matches!(
        store.add_goal("   ").unwrap_err(),
        StoreError::InvalidInput(InputError::EmptyText { .. })
    ));
    assert!(matches!(
        store.add_goal(&"x".repeat(101)).unwrap_err(),
        StoreError::InvalidInput(InputError::TextTooLong { max_chars: 100, .. })
    ));
    assert!(store.into_repository().raw_payload().is_none());
}

#[test]
fn mood_and_gratitude_histories_are_bounded() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    for step in 0..9u8 {
        clock.advance(Duration::days(1));
        store.set_mood(step % 5 + 1).unwrap();
    }
    let history = &store.state().mood_history;
    assert_eq!(history.len(), 7);
    assert_eq!(history.last().unwrap().date, day(24));
    assert_eq!(store.state().current_mood, 4);

    for n in 0..12 {
        store.add_gratitude_entry(&format!("thing {n}")).unwrap();
    }
    let entries = &store.state().gratitude_entries;
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].text, "thing 11");
}

#[test]
fn workout_upsert_and_lookup_by_date() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    store
        .add_workout_entry(day(10), &["Running", "  "], "5km")
        .unwrap();
    store
        .add_workout_entry(day(10), &["Swimming"], "pool")
        .unwrap();
    store.add_workout_entry(day(12), &["Yoga"], "").unwrap();

    assert_eq!(store.state().workout_entries.len(), 2);
    let entry = store.get_workout_by_date(day(10)).unwrap();
    assert_eq!(entry.exercises, vec!["Swimming".to_string()]);
    assert_eq!(entry.notes, "pool");
    assert!(store.get_workout_by_date(day(11)).is_none());

    assert_eq!(
        store.add_workout_entry(day(13), &["", " "], "").unwrap_err(),
        StoreError::InvalidInput(InputError::NoExercises)
    );

    store.remove_workout_entry(day(12)).unwrap();
    assert_eq!(
        store.remove_workout_entry(day(12)).unwrap_err(),
        StoreError::WorkoutNotFound(day(12))
    );
}

#[test]
fn preferences_and_break_settings() {
    let clock = FixedClock::new(t0());
    let mut store = memory_store(&clock);

    store.toggle_notifications().unwrap();
    store.toggle_music().unwrap();
    store.toggle_eye_rest_reminders().unwrap();
    let prefs = store.state().preferences;
    assert!(!prefs.notifications_enabled);
    assert!(prefs.relaxing_music_enabled);
    assert!(!prefs.eye_rest_reminders);

    store.set_break_interval(30).unwrap();
    assert!(store.set_break_interval(0).is_err());
    assert!(store.set_break_interval(481).is_err());
    assert_eq!(store.state().break_timer.interval_minutes, 30);

    clock.advance(Duration::minutes(42));
    store.update_break_time().unwrap();
    assert_eq!(
        store.state().break_timer.last_break_time,
        t0() + Duration::minutes(42)
    );
}

#[test]
fn every_accepted_mutation_is_persisted() {
    let clock = FixedClock::new(t0());
    let repo = InMemorySnapshotRepository::new();
    let mut store = WellnessStore::open(&repo, &clock, StoreConfig::default());

    store.add_water(500).unwrap();
    let saved = repo.load_snapshot().unwrap().unwrap();
    assert_eq!(saved.state, *store.state());

    store.set_mood(2).unwrap();
    let saved = repo.load_snapshot().unwrap().unwrap();
    assert_eq!(saved.state.current_mood, 2);
}

#[test]
fn sqlite_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wellness.db");
    let clock = FixedClock::new(t0());

    let goal_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn, "wellness-storage").unwrap();
        let mut store = WellnessStore::open(repo, &clock, StoreConfig::default());
        store.add_water(750).unwrap();
        store.add_gratitude_entry("  quiet morning ").unwrap();
        store.add_workout_entry(day(14), &["Cycling"], "").unwrap();
        store.add_goal("Stretch daily").unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn, "wellness-storage").unwrap();
    let store = WellnessStore::open(repo, &clock, StoreConfig::default());
    let state = store.state();
    assert_eq!(state.water.intake_ml, 750);
    assert_eq!(state.gratitude_entries[0].text, "quiet morning");
    assert!(state.goal(&goal_id).is_some());
    assert!(store.get_workout_by_date(day(14)).is_some());
}

#[test]
fn storage_keys_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("keys.db")).unwrap();
    let clock = FixedClock::new(t0());

    let repo_a = SqliteSnapshotRepository::try_new(&conn, "profile-a").unwrap();
    let mut store_a = WellnessStore::open(repo_a, &clock, StoreConfig::default());
    store_a.add_water(1000).unwrap();

    let repo_b = SqliteSnapshotRepository::try_new(&conn, "profile-b").unwrap();
    let store_b = WellnessStore::open(repo_b, &clock, StoreConfig::default());
    assert_eq!(store_b.state().water.intake_ml, 0);

    assert!(matches!(
        SqliteSnapshotRepository::try_new(&conn, "../escape").err(),
        Some(RepoError::InvalidStorageKey(_))
    ));
}

#[test]
fn reload_and_clear_follow_storage() {
    let clock = FixedClock::new(t0());
    let repo = InMemorySnapshotRepository::new();
    let mut writer = WellnessStore::open(&repo, &clock, StoreConfig::default());
    let mut reader = WellnessStore::open(&repo, &clock, StoreConfig::default());

    writer.add_water(300).unwrap();
    assert_eq!(reader.state().water.intake_ml, 0);
    reader.reload();
    assert_eq!(reader.state().water.intake_ml, 300);

    assert!(writer.clear());
    assert!(repo.raw_payload().is_none());
    assert_eq!(writer.state().water.intake_ml, 0);
}

#[test]
fn corrupt_snapshot_falls_back_to_defaults() {
    let clock = FixedClock::new(t0());
    let repo = InMemorySnapshotRepository::with_payload("{not json");
    let mut store = WellnessStore::open(repo, &clock, StoreConfig::default());

    assert_eq!(store.state(), &WellnessState::new(t0()));

    // The next mutation overwrites the unreadable payload.
    store.add_water(250).unwrap();
    let repo = store.into_repository();
    assert!(repo.load_snapshot().unwrap().is_some());
}

struct FailingRepository;

impl SnapshotRepository for FailingRepository {
    fn load_snapshot(&self) -> RepoResult<Option<DecodedSnapshot>> {
        Ok(None)
    }

    fn save_snapshot(&self, _state: &WellnessState) -> RepoResult<()> {
        Err(RepoError::Snapshot(SnapshotError::InvalidShape(
            "disk full".to_string(),
        )))
    }

    fn clear_snapshot(&self) -> RepoResult<()> {
        Err(RepoError::Snapshot(SnapshotError::InvalidShape(
            "read-only".to_string(),
        )))
    }
}

#[test]
fn save_failure_keeps_in_memory_state() {
    let clock = FixedClock::new(t0());
    let mut store = WellnessStore::open(FailingRepository, &clock, StoreConfig::default());

    store.add_water(400).unwrap();
    assert_eq!(store.state().water.intake_ml, 400);
    assert!(store.last_save_error().unwrap().contains("disk full"));

    assert!(!store.clear());
    assert_eq!(store.state().water.intake_ml, 0);
    assert!(store.last_save_error().unwrap().contains("read-only"));
}
