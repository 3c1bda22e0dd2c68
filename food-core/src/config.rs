//! Store configuration.

use crate::menu::MealCategory;
use crate::selection::DEFAULT_RECENT_WINDOW;
use std::path::PathBuf;
use thiserror::Error;

/// Directory holding one file per persisted key.
pub const DATA_DIR_VAR: &str = "TODAY_FOOD_DATA_DIR";
/// Single JSON file used when the data directory is unusable.
pub const LOCAL_STORE_VAR: &str = "TODAY_FOOD_LOCAL_STORE";
pub const SEED_VAR: &str = "TODAY_FOOD_SEED";
/// Comma-separated category names.
pub const CATEGORIES_VAR: &str = "TODAY_FOOD_CATEGORIES";
pub const RECENT_WINDOW_VAR: &str = "TODAY_FOOD_RECENT_WINDOW";

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Configuration for a [`FoodStore`](crate::FoodStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Categories that always exist in the menu, in display order.
    pub categories: Vec<MealCategory>,

    /// How many recent picks are kept out of the candidate pool.
    pub recent_window: usize,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Host-specific store: a directory with one file per key.
    pub data_dir: Option<PathBuf>,

    /// Generic local store: one JSON file holding every key.
    pub local_store_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                MealCategory::breakfast(),
                MealCategory::lunch(),
                MealCategory::dinner(),
            ],
            recent_window: DEFAULT_RECENT_WINDOW,
            seed: None,
            data_dir: None,
            local_store_path: None,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `TODAY_FOOD_*` environment variables.
    ///
    /// Unset variables keep their defaults. Without `TODAY_FOOD_DATA_DIR`
    /// the data directory falls back to `$HOME/.today-food`, and the local
    /// store to a file under the system temp directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(".today-food")));

        config.local_store_path = Some(
            lookup(LOCAL_STORE_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    std::env::temp_dir()
                        .join("today-food")
                        .join("local-storage.json")
                }),
        );

        if let Some(value) = lookup(SEED_VAR) {
            let seed = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: SEED_VAR,
                value: value.clone(),
            })?;
            config.seed = Some(seed);
        }

        if let Some(value) = lookup(RECENT_WINDOW_VAR) {
            config.recent_window =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: RECENT_WINDOW_VAR,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(CATEGORIES_VAR) {
            let categories: Vec<MealCategory> = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(MealCategory::from)
                .collect();
            if categories.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: CATEGORIES_VAR,
                    value,
                });
            }
            config.categories = categories;
        }

        Ok(config)
    }

    /// Replace the configured categories.
    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MealCategory>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the anti-repeat window size.
    pub fn with_recent_window(mut self, size: usize) -> Self {
        self.recent_window = size;
        self
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_local_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_store_path = Some(path.into());
        self
    }
}
