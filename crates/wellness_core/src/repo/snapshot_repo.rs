//! Snapshot repository contract, SQLite and in-memory implementations.
//!
//! # Invariants
//! - Payloads are always produced by `encode_snapshot` and read back through
//!   `decode_snapshot`, so migrations apply to every backend.
//! - The storage key is validated once at construction.

use crate::config::{validate_storage_key, ConfigError};
use crate::db::DbError;
use crate::model::state::WellnessState;
use crate::snapshot::{
    decode_snapshot, encode_snapshot, latest_version, DecodedSnapshot, SnapshotError,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Snapshot(SnapshotError),
    InvalidStorageKey(ConfigError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::InvalidStorageKey(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::InvalidStorageKey(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<SnapshotError> for RepoError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Key-to-snapshot storage used by `WellnessStore`.
pub trait SnapshotRepository {
    /// Returns the stored snapshot, or `None` when nothing was saved yet.
    fn load_snapshot(&self) -> RepoResult<Option<DecodedSnapshot>>;
    /// Replaces the stored snapshot with `state`.
    fn save_snapshot(&self, state: &WellnessState) -> RepoResult<()>;
    /// Removes the stored snapshot. Clearing an empty key is not an error.
    fn clear_snapshot(&self) -> RepoResult<()>;
    /// Key this repository reads and writes, when it is keyed at all.
    fn storage_key(&self) -> Option<&str> {
        None
    }
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for &R {
    fn load_snapshot(&self) -> RepoResult<Option<DecodedSnapshot>> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, state: &WellnessState) -> RepoResult<()> {
        (**self).save_snapshot(state)
    }

    fn clear_snapshot(&self) -> RepoResult<()> {
        (**self).clear_snapshot()
    }

    fn storage_key(&self) -> Option<&str> {
        (**self).storage_key()
    }
}

/// SQLite-backed repository storing one row per storage key.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
    storage_key: String,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Binds a repository to `storage_key` on an already migrated connection.
    ///
    /// # Errors
    /// - Returns `InvalidStorageKey` when the key fails validation.
    pub fn try_new(conn: &'conn Connection, storage_key: &str) -> RepoResult<Self> {
        validate_storage_key(storage_key).map_err(RepoError::InvalidStorageKey)?;
        Ok(Self {
            conn,
            storage_key: storage_key.to_string(),
        })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<Option<DecodedSnapshot>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE storage_key = ?1;",
                [self.storage_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => Ok(Some(decode_snapshot(&payload)?)),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, state: &WellnessState) -> RepoResult<()> {
        let payload = encode_snapshot(state)?;
        self.conn.execute(
            "INSERT INTO snapshots (storage_key, format_version, payload, updated_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT(storage_key) DO UPDATE SET
                format_version = excluded.format_version,
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.storage_key.as_str(), latest_version(), payload],
        )?;
        Ok(())
    }

    fn clear_snapshot(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM snapshots WHERE storage_key = ?1;",
            [self.storage_key.as_str()],
        )?;
        Ok(())
    }

    fn storage_key(&self) -> Option<&str> {
        Some(&self.storage_key)
    }
}

/// Repository keeping the encoded payload in memory.
#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    payload: RefCell<Option<String>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with a raw payload, e.g. a legacy snapshot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
        }
    }

    /// Returns the last saved payload as stored.
    pub fn raw_payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn load_snapshot(&self) -> RepoResult<Option<DecodedSnapshot>> {
        match self.payload.borrow().as_deref() {
            Some(payload) => Ok(Some(decode_snapshot(payload)?)),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, state: &WellnessState) -> RepoResult<()> {
        let payload = encode_snapshot(state)?;
        *self.payload.borrow_mut() = Some(payload);
        Ok(())
    }

    fn clear_snapshot(&self) -> RepoResult<()> {
        self.payload.borrow_mut().take();
        Ok(())
    }
}
