//! FoodStore - the single stateful object the UI layer holds.
//!
//! The store wires the menu repository, selection engine, history tracker
//! and today's plan over one storage port. It adds no rules of its own:
//! each method delegates, and successful mutations are then published to
//! subscribers.

use crate::config::{ConfigError, StoreConfig};
use crate::events::{EventBus, StoreEvent};
use crate::history::HistoryTracker;
use crate::menu::{Dish, MealCategory, Menu, Nutrition};
use crate::plan::{PlanTracker, TodayPlan};
use crate::repository::MenuRepository;
use crate::selection::{RecentWindow, SelectionEngine, SelectionError};
use crate::storage::StoragePort;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Errors from FoodStore operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// The empty category, if this is a `CategoryEmpty` error.
    pub fn empty_category(&self) -> Option<&MealCategory> {
        match self {
            StoreError::Selection(SelectionError::CategoryEmpty(category)) => Some(category),
            _ => None,
        }
    }
}

/// Menu, recommender and history for one session.
#[derive(Debug)]
pub struct FoodStore {
    config: StoreConfig,
    storage: StoragePort,
    menu: MenuRepository,
    history: HistoryTracker,
    plan: PlanTracker,
    engine: SelectionEngine<StdRng>,
    events: EventBus,
}

impl FoodStore {
    /// Create a store, selecting storage from the configured locations.
    pub fn new(config: StoreConfig) -> Self {
        let storage = StoragePort::from_config(&config);
        Self::with_storage(config, storage)
    }

    /// Create a store configured from `TODAY_FOOD_*` environment variables.
    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// Create a store over an explicit storage port.
    pub fn with_storage(config: StoreConfig, storage: StoragePort) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            menu: MenuRepository::load(storage.clone(), &config.categories),
            history: HistoryTracker::load(storage.clone()),
            plan: PlanTracker::load(storage.clone(), &config.categories),
            engine: SelectionEngine::new(config.recent_window, rng),
            events: EventBus::new(),
            storage,
            config,
        }
    }

    /// Pick one dish from a category.
    ///
    /// Fails with `CategoryEmpty` when the category has no dishes; nothing
    /// is recorded in that case.
    pub fn pick(&mut self, category: &MealCategory) -> Result<Dish, StoreError> {
        let dish = self
            .engine
            .pick(self.menu.menu(), category, &mut self.history)?;
        self.events.publish(StoreEvent::Picked {
            category: category.clone(),
            dishes: vec![dish.name.clone()],
        });
        Ok(dish)
    }

    /// Pick up to `count` distinct dishes from a category.
    pub fn pick_many(
        &mut self,
        category: &MealCategory,
        count: usize,
    ) -> Result<Vec<Dish>, StoreError> {
        let dishes = self
            .engine
            .pick_many(self.menu.menu(), category, count, &mut self.history)?;
        if !dishes.is_empty() {
            self.events.publish(StoreEvent::Picked {
                category: category.clone(),
                dishes: dishes.iter().map(|d| d.name.clone()).collect(),
            });
        }
        Ok(dishes)
    }

    /// Forget the selection history, the recent window and today's plan.
    pub fn clear_history(&mut self) {
        self.history.clear(self.engine.recent_mut());
        self.plan.clear();
        self.events.publish(StoreEvent::HistoryCleared);
    }

    /// Add a dish to a category, creating the category if needed.
    ///
    /// A name already present in the category is a logged no-op. Returns
    /// `true` if the dish was added.
    pub fn add_dish<M, T>(
        &mut self,
        category: impl Into<MealCategory>,
        name: impl Into<String>,
        materials: M,
        nutrition: Nutrition,
        tags: T,
    ) -> bool
    where
        M: IntoIterator,
        M::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let category = category.into();
        let dish = Dish::new(name)
            .with_materials(materials)
            .with_nutrition(nutrition)
            .with_tags(tags);
        let name = dish.name.clone();

        if !self.menu.add(category.clone(), dish) {
            return false;
        }
        self.events.publish(StoreEvent::DishAdded { category, name });
        true
    }

    /// Remove a dish by name. Returns `true` if something was removed.
    pub fn remove_dish(&mut self, category: &MealCategory, name: &str) -> bool {
        if self.menu.remove(category, name).is_none() {
            return false;
        }
        self.events.publish(StoreEvent::DishRemoved {
            category: category.clone(),
            name: name.to_string(),
        });
        true
    }

    /// Restore the built-in menu.
    pub fn reset_menu(&mut self) {
        self.menu.reset();
        self.events.publish(StoreEvent::MenuReset);
    }

    /// Record the dishes settled on for a meal.
    ///
    /// Ignored for categories that are not in the menu.
    pub fn set_plan(&mut self, category: &MealCategory, dishes: Vec<Dish>) -> bool {
        if !self.plan.set(self.menu.menu(), category, dishes) {
            return false;
        }
        self.events.publish(StoreEvent::PlanUpdated {
            category: category.clone(),
        });
        true
    }

    /// Register a callback for every successful mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + Send + 'static) {
        self.events.subscribe(listener);
    }

    pub fn menu(&self) -> &Menu {
        self.menu.menu()
    }

    /// Every dish picked so far, in first-seen order.
    pub fn history(&self) -> &[String] {
        self.history.names()
    }

    /// The anti-repeat window for this session.
    pub fn recent(&self) -> &RecentWindow {
        self.engine.recent()
    }

    pub fn plan(&self) -> &TodayPlan {
        self.plan.plan()
    }

    pub fn dish(&self, category: &MealCategory, name: &str) -> Option<&Dish> {
        self.menu.menu().find(category, name)
    }

    /// Configured categories first, then any others the menu holds.
    pub fn categories(&self) -> Vec<MealCategory> {
        let mut categories = self.config.categories.clone();
        for category in self.menu.menu().categories() {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Name of the storage backend this store committed to.
    pub fn storage_backend(&self) -> &'static str {
        self.storage.backend_name()
    }
}
