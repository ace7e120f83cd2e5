//! Key-value persistence for the task collection.
//!
//! A [`KvStore`] maps string keys to string values. [`FileKvStore`] backs
//! each key with a JSON file under a data directory; [`MemoryKvStore`] keeps
//! everything in memory for tests and ephemeral sessions. On top of either
//! sits [`TaskVault`], which owns the fixed storage key and the JSON wire
//! format and absorbs every failure at this boundary: a bad read falls back
//! to an empty collection and a failed write is dropped, both after logging.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::task::Task;

/// Storage key under which the task collection is persisted.
pub const TASKS_KEY: &str = "tasks";

/// Errors that can occur at the key-value storage boundary.
///
/// These never escape [`TaskVault`]; they exist so store implementations
/// can report what went wrong before the vault absorbs it.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read the value stored under a key.
    #[error("failed to read stored value for {key:?}: {source}")]
    Read {
        /// Key that was being read.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the value for a key.
    #[error("failed to write value for {key:?}: {source}")]
    Write {
        /// Key that was being written.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// String key-value store contract.
///
/// Implementors handle raw reads and writes; they do not interpret values.
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the store rejects the write.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: each key maps to `<dir>/<key>.json`.
///
/// The directory is created on first write. A missing file reads as an
/// absent key, not an error.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })
    }
}

/// In-memory store for tests and sessions with persistence disabled.
///
/// Clones share the same backing map, so a second handle observes writes
/// made through the first.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistence adapter for the task collection.
///
/// Owns the fixed storage key and the whole-collection-replace JSON format:
/// a single array of task records, optional fields omitted when absent.
/// Failures are absorbed here rather than propagated; the in-memory
/// collection stays authoritative for the session either way, and the next
/// successful mutation re-persists the then-current state.
pub struct TaskVault {
    store: Box<dyn KvStore>,
}

impl TaskVault {
    /// Creates a vault over the given store.
    #[must_use]
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Reads the persisted collection.
    ///
    /// An absent key, an unreadable store, or a value that fails to parse
    /// as a task array all yield an empty collection after a logged warning.
    #[must_use]
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to load tasks, starting empty: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("stored tasks are not valid task records, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Serializes the full collection and overwrites the stored value.
    ///
    /// A rejected write (e.g. out of space) is logged and dropped; the
    /// caller is never interrupted.
    pub fn save(&self, tasks: &[Task]) {
        let json = match serde_json::to_string(tasks) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize tasks: {e}");
                return;
            }
        };
        if let Err(e) = self.store.put(TASKS_KEY, &json) {
            tracing::warn!("failed to persist tasks: {e}");
        }
    }
}
