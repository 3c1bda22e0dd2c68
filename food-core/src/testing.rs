//! Testing utilities for the food store.
//!
//! This module provides tools for integration testing:
//! - `StoreHarness` for driving a store over shared in-memory storage,
//!   including "reloading the page" with a fresh store
//! - `BrokenStorage` for exercising degraded, memory-only operation
//! - Assertion helpers for verifying store state

use crate::config::StoreConfig;
use crate::menu::{Dish, MealCategory, Menu};
use crate::repository::MENU_KEY;
use crate::storage::{MemoryStorage, StorageBackend, StorageError, StoragePort};
use crate::store::FoodStore;
use std::collections::HashSet;

/// Seed used by harness stores unless overridden.
pub const HARNESS_SEED: u64 = 0x5eed;

/// Build a menu with one category of bare dishes.
pub fn menu_with(category: &str, names: &[&str]) -> Menu {
    [(
        MealCategory::new(category),
        names.iter().map(|n| Dish::new(*n)).collect(),
    )]
    .into_iter()
    .collect()
}

/// A backend that probes fine but fails every operation afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenStorage;

impl StorageBackend for BrokenStorage {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn probe(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

/// A store plus a handle on its backing storage.
pub struct StoreHarness {
    /// The store under test.
    pub store: FoodStore,
    /// Storage shared with every store this harness builds.
    pub storage: MemoryStorage,
    config: StoreConfig,
}

impl StoreHarness {
    /// A harness over empty storage, so the store starts from the defaults.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::new().with_seed(HARNESS_SEED))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let storage = MemoryStorage::new();
        let store = FoodStore::with_storage(config.clone(), StoragePort::new(storage.clone()));
        Self {
            store,
            storage,
            config,
        }
    }

    /// A harness whose storage already holds the given menu.
    pub fn with_menu(menu: &Menu) -> Self {
        let config = StoreConfig::new().with_seed(HARNESS_SEED);
        let storage = MemoryStorage::new();
        let content = serde_json::to_string(menu).unwrap_or_default();
        storage.insert_raw(MENU_KEY, content);
        let store = FoodStore::with_storage(config.clone(), StoragePort::new(storage.clone()));
        Self {
            store,
            storage,
            config,
        }
    }

    /// Replace the store with a new one over the same storage.
    ///
    /// Persisted state carries over; the recent window does not.
    pub fn reload(&mut self) -> &mut FoodStore {
        self.store = FoodStore::with_storage(
            self.config.clone(),
            StoragePort::new(self.storage.clone()),
        );
        &mut self.store
    }

    /// Pick `times` dishes one at a time and return their names.
    pub fn pick_names(&mut self, category: &str, times: usize) -> Vec<String> {
        let category = MealCategory::new(category);
        (0..times)
            .filter_map(|_| self.store.pick(&category).ok())
            .map(|d| d.name)
            .collect()
    }

    pub fn names_in(&self, category: &str) -> Vec<String> {
        self.store
            .menu()
            .dishes(&MealCategory::new(category))
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    /// Raw value stored under a key.
    pub fn persisted(&self, key: &str) -> Option<String> {
        self.storage.raw(key)
    }
}

impl Default for StoreHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the history holds no duplicate names.
#[track_caller]
pub fn assert_history_unique(store: &FoodStore) {
    let unique: HashSet<&String> = store.history().iter().collect();
    assert_eq!(
        unique.len(),
        store.history().len(),
        "Expected unique history, got {:?}",
        store.history()
    );
}

/// Assert the recent window never exceeds its capacity.
#[track_caller]
pub fn assert_recent_bounded(store: &FoodStore) {
    let recent = store.recent();
    assert!(
        recent.len() <= recent.capacity(),
        "Recent window holds {} names, capacity {}",
        recent.len(),
        recent.capacity()
    );
}

/// Assert a category holds exactly `expected` dishes.
#[track_caller]
pub fn assert_category_len(store: &FoodStore, category: &str, expected: usize) {
    let actual = store.menu().dishes(&MealCategory::new(category)).len();
    assert_eq!(
        actual, expected,
        "Expected {expected} dishes in '{category}', got {actual}"
    );
}
