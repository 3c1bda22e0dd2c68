//! Menu repository: the source of truth for the working menu.
//!
//! Every successful mutation writes the whole menu back through the
//! storage port. Reads never write.

use crate::catalog;
use crate::menu::{Dish, MealCategory, Menu};
use crate::storage::StoragePort;
use tracing::{debug, info, warn};

/// Storage key for the user's edited menu.
pub const MENU_KEY: &str = "user-menu-data";

/// Owns the working copy of the menu.
#[derive(Debug)]
pub struct MenuRepository {
    menu: Menu,
    categories: Vec<MealCategory>,
    storage: StoragePort,
}

impl MenuRepository {
    /// Load the persisted menu, or the built-in defaults when it is absent
    /// or unreadable. Configured categories are always present afterwards.
    pub fn load(storage: StoragePort, categories: &[MealCategory]) -> Self {
        let menu = match storage.load_json::<Menu>(MENU_KEY) {
            Some(mut menu) => {
                let dropped = menu.dedupe();
                if dropped > 0 {
                    warn!(dropped, "persisted menu had repeated dish names, keeping the first");
                }
                debug!(dishes = menu.total_dishes(), "loaded persisted menu");
                menu
            }
            None => catalog::default_menu(),
        };

        let mut repo = Self {
            menu,
            categories: categories.to_vec(),
            storage,
        };
        repo.ensure_categories();
        repo
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Add a dish, creating the category if needed.
    ///
    /// A dish whose name already exists in the category is ignored with a
    /// warning and nothing is persisted. Returns `true` if the dish was added.
    pub fn add(&mut self, category: MealCategory, dish: Dish) -> bool {
        if self.menu.contains(&category, &dish.name) {
            warn!(category = %category, dish = %dish.name, "dish already exists in category, ignoring");
            return false;
        }

        debug!(category = %category, dish = %dish.name, "adding dish");
        self.menu.push(category, dish);
        self.persist();
        true
    }

    /// Remove a dish by name. Missing dishes are a silent no-op.
    pub fn remove(&mut self, category: &MealCategory, name: &str) -> Option<Dish> {
        let removed = self.menu.remove(category, name)?;
        debug!(category = %category, dish = name, "removed dish");
        self.persist();
        Some(removed)
    }

    /// Replace the working menu with a fresh copy of the defaults.
    pub fn reset(&mut self) {
        self.menu = catalog::default_menu();
        self.ensure_categories();
        self.persist();
        info!("menu reset to defaults");
    }

    fn ensure_categories(&mut self) {
        for category in &self.categories {
            self.menu.ensure_category(category.clone());
        }
    }

    fn persist(&self) {
        self.storage.save_json(MENU_KEY, &self.menu);
    }
}
