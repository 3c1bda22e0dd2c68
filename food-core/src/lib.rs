//! Menu store and recommender for a personal "what should I eat" picker.
//!
//! This crate provides:
//! - A categorized dish menu with a built-in default catalog
//! - A randomized picker that avoids the last few picks
//! - A deduplicated selection history and a plan for today's meals
//! - Best-effort persistence through a pluggable storage port
//!
//! # Quick Start
//!
//! ```no_run
//! use food_core::{FoodStore, MealCategory, StoreConfig};
//!
//! fn main() -> Result<(), food_core::StoreError> {
//!     let config = StoreConfig::from_env()?.with_recent_window(3);
//!     let mut store = FoodStore::new(config);
//!
//!     let dish = store.pick(&MealCategory::lunch())?;
//!     println!("Today's lunch: {}", dish.name);
//!     println!("Picked so far: {:?}", store.history());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod events;
pub mod history;
pub mod menu;
pub mod plan;
pub mod repository;
pub mod selection;
pub mod storage;
pub mod store;
pub mod testing;

// Primary public API
pub use config::{ConfigError, StoreConfig};
pub use events::StoreEvent;
pub use menu::{nutrition, shopping_list, Dish, MealCategory, Menu, Nutrition, NutritionLevel};
pub use plan::TodayPlan;
pub use selection::{RecentWindow, SelectionError};
pub use storage::{
    DirStorage, FileStorage, MemoryStorage, NoopStorage, StorageBackend, StorageError,
    StoragePort,
};
pub use store::{FoodStore, StoreError};
pub use testing::StoreHarness;
