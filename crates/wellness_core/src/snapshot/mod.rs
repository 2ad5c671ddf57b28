//! Persisted snapshot envelope for `WellnessState`.
//!
//! # Responsibility
//! - Encode the full state into a versioned JSON envelope.
//! - Decode envelopes of any supported version, migrating older layouts.
//!
//! # Invariants
//! - Envelope shape is `{"state": {...}, "version": N}`.
//! - Decoded state is normalized before it is handed to callers.
//! - One malformed value costs that value, never the whole snapshot.
//! - Versions newer than `latest_version()` are rejected, never guessed.

mod lenient;
mod migrations;

pub use migrations::latest_version;

use crate::model::state::WellnessState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    UnsupportedVersion { version: u32, latest_supported: u32 },
    InvalidShape(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "snapshot json error: {err}"),
            Self::UnsupportedVersion {
                version,
                latest_supported,
            } => write!(
                f,
                "snapshot version {version} is newer than supported {latest_supported}"
            ),
            Self::InvalidShape(message) => write!(f, "invalid snapshot shape: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a WellnessState,
    version: u32,
}

#[derive(Deserialize)]
struct RawEnvelope {
    state: Value,
    #[serde(default)]
    version: u32,
}

/// Decoded snapshot plus bookkeeping for load diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub state: WellnessState,
    /// Version found in storage before migration.
    pub stored_version: u32,
    /// Invariant repairs applied after decoding.
    pub repairs: usize,
}

/// Serializes `state` at the latest snapshot version.
pub fn encode_snapshot(state: &WellnessState) -> SnapshotResult<String> {
    let envelope = EnvelopeRef {
        state,
        version: latest_version(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a stored payload, migrating and normalizing it.
pub fn decode_snapshot(payload: &str) -> SnapshotResult<DecodedSnapshot> {
    let raw: RawEnvelope = serde_json::from_str(payload)?;
    let latest = latest_version();
    if raw.version > latest {
        return Err(SnapshotError::UnsupportedVersion {
            version: raw.version,
            latest_supported: latest,
        });
    }
    if !raw.state.is_object() {
        return Err(SnapshotError::InvalidShape(
            "`state` must be a JSON object".to_string(),
        ));
    }

    let migrated = migrations::migrate(raw.state, raw.version)?;
    let (mut state, decode_repairs) = lenient::decode_state(migrated, Utc::now())?;
    let repairs = decode_repairs + state.normalize();

    Ok(DecodedSnapshot {
        state,
        stored_version: raw.version,
        repairs,
    })
}
