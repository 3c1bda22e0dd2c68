//! Key/value persistence behind a single port.
//!
//! Store components talk to a [`StoragePort`], which commits at construction
//! time to the first [`StorageBackend`] whose probe succeeds. Backends are
//! fallible; the port is not. Failed or malformed reads look like an absent
//! key and failed writes are logged and dropped, so a broken disk degrades
//! the store to memory-only instead of failing the caller.

use crate::config::StoreConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A concrete key/value facility offered by the host environment.
///
/// Values are opaque text; encoding is the caller's business.
pub trait StorageBackend: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Check whether this backend can be used right now.
    fn probe(&self) -> Result<(), StorageError>;

    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// Backends
// ============================================================================

/// Host-specific store: one file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a key. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        let sanitized = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>();
        self.root.join(format!("{sanitized}.json"))
    }
}

impl StorageBackend for DirStorage {
    fn name(&self) -> &'static str {
        "dir"
    }

    fn probe(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let probe = self.root.join(".probe");
        fs::write(&probe, b"ok")?;
        fs::remove_file(&probe)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Generic local store: a single JSON object file holding every key.
///
/// The whole file is read and rewritten on each write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries for a read-modify-write cycle. A corrupt file starts over.
    fn entries_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load_entries() {
            Err(StorageError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "local store is corrupt, starting over");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn store_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &'static str {
        "file"
    }

    fn probe(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        if self.path.is_dir() {
            return Err(StorageError::Unavailable(format!(
                "{} is a directory",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = lock(&self.guard);
        Ok(self.load_entries()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let mut entries = self.entries_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.store_entries(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let mut entries = self.entries_for_update()?;
        if entries.remove(key).is_some() {
            self.store_entries(&entries)?;
        }
        Ok(())
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under a key, bypassing any port.
    pub fn raw(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.entries).contains_key(key)
    }

    /// Seed a raw value, bypassing any port.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        lock(&self.entries).insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn probe(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert_raw(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Last-resort backend: nothing is ever stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl StorageBackend for NoopStorage {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn probe(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

// ============================================================================
// Port
// ============================================================================

/// Infallible key/value access over the backend chosen at construction.
///
/// Cloning is cheap and clones share the backend.
#[derive(Clone)]
pub struct StoragePort {
    backend: Arc<dyn StorageBackend>,
}

impl StoragePort {
    /// Use a backend directly, without probing.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A port that persists nothing.
    pub fn noop() -> Self {
        Self::new(NoopStorage)
    }

    /// Commit to the first candidate whose probe succeeds, in order.
    ///
    /// Falls back to [`NoopStorage`] when every candidate fails.
    pub fn select(candidates: Vec<Box<dyn StorageBackend>>) -> Self {
        for candidate in candidates {
            match candidate.probe() {
                Ok(()) => {
                    debug!(backend = candidate.name(), "selected storage backend");
                    return Self {
                        backend: Arc::from(candidate),
                    };
                }
                Err(e) => {
                    debug!(backend = candidate.name(), error = %e, "storage backend unavailable");
                }
            }
        }
        warn!("no storage backend available, running without persistence");
        Self::noop()
    }

    /// The standard chain: data directory, then local store file, then no-op.
    pub fn from_config(config: &StoreConfig) -> Self {
        let mut candidates: Vec<Box<dyn StorageBackend>> = Vec::new();
        if let Some(dir) = &config.data_dir {
            candidates.push(Box::new(DirStorage::new(dir)));
        }
        if let Some(path) = &config.local_store_path {
            candidates.push(Box::new(FileStorage::new(path)));
        }
        Self::select(candidates)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read a key. Backend failures read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, backend = self.backend.name(), error = %e, "storage read failed");
                None
            }
        }
    }

    /// Write a key, best effort.
    pub fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.write(key, value) {
            warn!(key, backend = self.backend.name(), error = %e, "storage write failed");
        }
    }

    /// Remove a key, best effort.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            warn!(key, backend = self.backend.name(), error = %e, "storage remove failed");
        }
    }

    /// Read and decode a JSON value. Malformed data reads as absent.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = self.get(key)?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed persisted data");
                None
            }
        }
    }

    /// Encode and write a JSON value, best effort.
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(content) => self.set(key, &content),
            Err(e) => warn!(key, error = %e, "failed to encode value for storage"),
        }
    }
}

impl fmt::Debug for StoragePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoragePort")
            .field("backend", &self.backend.name())
            .finish()
    }
}
