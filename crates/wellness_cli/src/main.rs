//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `wellness_core` linkage with deterministic output.
//! - Given a database path, print a one-screen summary of the stored state.
//!
//! Usage: `wellness_cli [DB_PATH]`

use std::process::ExitCode;
use wellness_core::ui::break_reminder::{format_countdown, time_until_break};
use wellness_core::ui::dashboard::{goal_progress, water_progress_pct};
use wellness_core::{open_db, Clock, SqliteSnapshotRepository, StoreConfig, WellnessStore};

fn main() -> ExitCode {
    println!("wellness_core ping={}", wellness_core::ping());
    println!("wellness_core version={}", wellness_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let conn = open_db(db_path)?;
    let repo = SqliteSnapshotRepository::try_new(&conn, &config.storage_key)?;
    let store = WellnessStore::open_with_system_clock(repo, config);
    let state = store.state();
    let goals = goal_progress(state);
    let until_break = time_until_break(state, store.clock().now());

    println!("storage_key={}", store.config().storage_key);
    println!(
        "water={}/{}ml ({:.0}%)",
        state.water.intake_ml,
        state.water.goal_ml,
        water_progress_pct(state)
    );
    println!(
        "mood={} history={}",
        state.current_mood,
        state.mood_history.len()
    );
    println!("gratitude_entries={}", state.gratitude_entries.len());
    println!("goals={}/{} completed", goals.completed, goals.total);
    println!("workouts={}", state.workout_entries.len());
    println!("next_break_in={}", format_countdown(until_break));
    Ok(())
}
