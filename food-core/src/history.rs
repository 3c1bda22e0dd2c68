//! Persisted record of every dish picked in the current history lifetime.

use crate::selection::RecentWindow;
use crate::storage::StoragePort;
use std::collections::HashSet;
use tracing::{debug, info};

/// Storage key for the history record.
pub const HISTORY_KEY: &str = "today-food-history";

/// Deduplicated selection history, kept in first-seen order.
#[derive(Debug)]
pub struct HistoryTracker {
    names: Vec<String>,
    seen: HashSet<String>,
    storage: StoragePort,
}

impl HistoryTracker {
    /// Load history from storage. Absent or malformed data loads empty.
    pub fn load(storage: StoragePort) -> Self {
        let persisted: Vec<String> = storage.load_json(HISTORY_KEY).unwrap_or_default();

        let mut tracker = Self {
            names: Vec::with_capacity(persisted.len()),
            seen: HashSet::with_capacity(persisted.len()),
            storage,
        };
        for name in persisted {
            if tracker.seen.insert(name.clone()) {
                tracker.names.push(name);
            }
        }
        tracker
    }

    /// Record a picked name. Repeats are ignored and do not touch storage.
    ///
    /// Returns `true` if the name was new.
    pub fn record(&mut self, name: &str) -> bool {
        if !self.seen.insert(name.to_string()) {
            return false;
        }
        self.names.push(name.to_string());
        self.storage.save_json(HISTORY_KEY, &self.names);
        debug!(dish = name, total = self.names.len(), "recorded history");
        true
    }

    /// Forget everything, including the session's recent window.
    ///
    /// The persisted key is removed rather than overwritten with `[]`.
    pub fn clear(&mut self, recent: &mut RecentWindow) {
        self.names.clear();
        self.seen.clear();
        recent.clear();
        self.storage.remove(HISTORY_KEY);
        info!("history cleared");
    }

    /// Names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_record_deduplicates() {
        let memory = MemoryStorage::new();
        let mut history = HistoryTracker::load(StoragePort::new(memory.clone()));

        assert!(history.record("a"));
        assert!(history.record("b"));
        assert!(!history.record("a"));

        assert_eq!(history.names(), ["a", "b"]);
        assert_eq!(memory.raw(HISTORY_KEY), Some(r#"["a","b"]"#.to_string()));
    }

    #[test]
    fn test_repeat_does_not_persist() {
        let memory = MemoryStorage::new();
        let mut history = HistoryTracker::load(StoragePort::new(memory.clone()));
        history.record("a");

        memory.insert_raw(HISTORY_KEY, "sentinel");
        history.record("a");
        assert_eq!(memory.raw(HISTORY_KEY), Some("sentinel".to_string()));
    }

    #[test]
    fn test_load_existing() {
        let memory = MemoryStorage::new();
        memory.insert_raw(HISTORY_KEY, r#"["x","y","x"]"#);

        let history = HistoryTracker::load(StoragePort::new(memory));
        assert_eq!(history.names(), ["x", "y"]);
        assert!(history.contains("y"));
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let memory = MemoryStorage::new();
        memory.insert_raw(HISTORY_KEY, r#"{"oops": true}"#);

        let history = HistoryTracker::load(StoragePort::new(memory));
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear_removes_key_and_window() {
        let memory = MemoryStorage::new();
        let mut history = HistoryTracker::load(StoragePort::new(memory.clone()));
        let mut recent = RecentWindow::default();
        history.record("a");
        recent.push("a");

        history.clear(&mut recent);

        assert!(history.is_empty());
        assert!(!history.contains("a"));
        assert!(recent.is_empty());
        assert!(!memory.contains(HISTORY_KEY));
    }

    #[test]
    fn test_empty_array_and_absent_key_load_the_same() {
        let memory = MemoryStorage::new();
        memory.insert_raw(HISTORY_KEY, "[]");
        let from_empty = HistoryTracker::load(StoragePort::new(memory));
        let from_absent = HistoryTracker::load(StoragePort::new(MemoryStorage::new()));

        assert_eq!(from_empty.names(), from_absent.names());
    }
}
