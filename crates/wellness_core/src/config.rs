//! Store configuration.
//!
//! # Responsibility
//! - Hold the storage key and the operator-configured defaults for new state.
//! - Read overrides from the environment.
//!
//! # Invariants
//! - A validated config always carries a storage key matching
//!   `STORAGE_KEY_PATTERN`, a positive water goal and an interval inside
//!   `BREAK_INTERVAL_MINUTES_RANGE`.

use crate::model::state::{DEFAULT_BREAK_INTERVAL_MINUTES, DEFAULT_WATER_GOAL_ML};
use crate::model::validation::{validate_break_interval, BREAK_INTERVAL_MINUTES_RANGE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "wellness-storage";

pub const ENV_STORAGE_KEY: &str = "WELLNESS_STORAGE_KEY";
pub const ENV_WATER_GOAL_ML: &str = "WELLNESS_WATER_GOAL_ML";
pub const ENV_BREAK_INTERVAL_MINUTES: &str = "WELLNESS_BREAK_INTERVAL_MINUTES";

const STORAGE_KEY_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$";

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(STORAGE_KEY_PATTERN).expect("valid storage key regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStorageKey(String),
    InvalidNumber { variable: &'static str, value: String },
    InvalidWaterGoal(u32),
    InvalidBreakInterval(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStorageKey(key) => write!(
                f,
                "invalid storage key `{key}`; expected 1-64 chars of [A-Za-z0-9._-] starting alphanumeric"
            ),
            Self::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a non-negative integer, got `{value}`")
            }
            Self::InvalidWaterGoal(value) => {
                write!(f, "water goal must be greater than zero, got {value}")
            }
            Self::InvalidBreakInterval(value) => write!(
                f,
                "break interval must be within {}..={} minutes, got {value}",
                BREAK_INTERVAL_MINUTES_RANGE.start(),
                BREAK_INTERVAL_MINUTES_RANGE.end()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Runtime configuration for a `WellnessStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Fixed identifier the snapshot is stored under.
    pub storage_key: String,
    /// Goal applied to freshly created state.
    pub water_goal_ml: u32,
    /// Interval applied to freshly created state.
    pub break_interval_minutes: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            water_goal_ml: DEFAULT_WATER_GOAL_ML,
            break_interval_minutes: DEFAULT_BREAK_INTERVAL_MINUTES,
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults overridden by `WELLNESS_*` variables.
    ///
    /// Unset or blank variables keep their default.
    ///
    /// # Errors
    /// - Returns an error when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = read(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(raw) = read(ENV_WATER_GOAL_ML) {
            config.water_goal_ml = parse_number(ENV_WATER_GOAL_ML, raw)?;
        }
        if let Some(raw) = read(ENV_BREAK_INTERVAL_MINUTES) {
            config.break_interval_minutes = parse_number(ENV_BREAK_INTERVAL_MINUTES, raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage_key(&self.storage_key)?;
        if self.water_goal_ml == 0 {
            return Err(ConfigError::InvalidWaterGoal(self.water_goal_ml));
        }
        validate_break_interval(self.break_interval_minutes)
            .map_err(|_| ConfigError::InvalidBreakInterval(self.break_interval_minutes))?;
        Ok(())
    }
}

/// Checks a storage key against the accepted pattern.
pub fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if STORAGE_KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(ConfigError::InvalidStorageKey(key.to_string()))
    }
}

fn parse_number(variable: &'static str, raw: String) -> Result<u32, ConfigError> {
    raw.parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber { variable, value: raw })
}
