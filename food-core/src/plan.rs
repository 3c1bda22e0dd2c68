//! Today's plan: the dishes the user settled on for each meal.

use crate::menu::{shopping_list, Dish, MealCategory, Menu};
use crate::storage::StoragePort;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Storage key for the plan.
pub const PLAN_KEY: &str = "today-plan";

/// Dishes chosen per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodayPlan {
    meals: BTreeMap<MealCategory, Vec<Dish>>,
}

impl TodayPlan {
    /// An empty plan with a slot for each category.
    pub fn empty(categories: &[MealCategory]) -> Self {
        Self {
            meals: categories.iter().map(|c| (c.clone(), Vec::new())).collect(),
        }
    }

    pub fn dishes(&self, category: &MealCategory) -> &[Dish] {
        self.meals.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MealCategory, &[Dish])> {
        self.meals.iter().map(|(c, d)| (c, d.as_slice()))
    }

    /// Materials for every planned dish.
    pub fn shopping_list(&self) -> Vec<String> {
        shopping_list(self.meals.values().flatten())
    }

    /// True when no slot holds a dish.
    pub fn is_empty(&self) -> bool {
        self.meals.values().all(Vec::is_empty)
    }
}

/// Owns and persists [`TodayPlan`].
#[derive(Debug)]
pub struct PlanTracker {
    plan: TodayPlan,
    categories: Vec<MealCategory>,
    storage: StoragePort,
}

impl PlanTracker {
    /// Load the plan. Absent or malformed data loads as an empty plan.
    pub fn load(storage: StoragePort, categories: &[MealCategory]) -> Self {
        let mut plan = storage
            .load_json::<TodayPlan>(PLAN_KEY)
            .unwrap_or_default();
        for category in categories {
            plan.meals.entry(category.clone()).or_default();
        }
        Self {
            plan,
            categories: categories.to_vec(),
            storage,
        }
    }

    pub fn plan(&self) -> &TodayPlan {
        &self.plan
    }

    /// Set the dishes for a category that exists in the menu.
    ///
    /// Unknown categories are ignored. Returns `true` if the plan changed.
    pub fn set(&mut self, menu: &Menu, category: &MealCategory, dishes: Vec<Dish>) -> bool {
        if !menu.has_category(category) {
            debug!(category = %category, "ignoring plan for unknown category");
            return false;
        }
        self.plan.meals.insert(category.clone(), dishes);
        self.storage.save_json(PLAN_KEY, &self.plan);
        true
    }

    /// Empty every slot and remove the persisted key.
    pub fn clear(&mut self) {
        self.plan = TodayPlan::empty(&self.categories);
        self.storage.remove(PLAN_KEY);
    }
}
