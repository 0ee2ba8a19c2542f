//! Key-value storage boundary for persisted word and error-record blobs.
//!
//! # Responsibility
//! - Define the synchronous string store contract used by services.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - A key holds one opaque UTF-8 string; the store never interprets it.
//! - `write` replaces the previous value for the key in full.
//! - SQLite-backed stores are only usable once the schema is in place.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

mod open;
mod sqlite;

pub use open::{open_store, open_store_in_memory, SCHEMA_VERSION};
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport error.
#[derive(Debug)]
pub enum StoreError {
    /// Backend could not serve the request.
    Unavailable(String),
    Sqlite(rusqlite::Error),
    /// Connection was not opened through `open_store*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "storage unavailable: {details}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store connection is at schema version {actual_version}, expected {expected_version}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Unavailable(_)
            | Self::UninitializedConnection { .. }
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string store keyed by name.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }
}

/// Process-local store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one raw value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryStore};

    #[test]
    fn memory_store_reads_none_for_unknown_key() {
        let store = MemoryStore::new();
        assert_eq!(store.read("missing").unwrap(), None);
    }

    #[test]
    fn memory_store_write_replaces_previous_value() {
        let store = MemoryStore::with_entry("k", "first");
        store.write("k", "second").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn borrowed_store_shares_state() {
        let store = MemoryStore::new();
        let borrowed = &store;
        borrowed.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
