//! Randomized dish selection with a short anti-repeat window.
//!
//! A pick draws uniformly from the category's dishes that are not in the
//! [`RecentWindow`]. When the window would rule out every dish, the filter is
//! waived for that pick instead of failing, so tiny menus keep working.

use crate::history::HistoryTracker;
use crate::menu::{Dish, MealCategory, Menu};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

/// Default number of recent picks kept out of the candidate pool.
pub const DEFAULT_RECENT_WINDOW: usize = 3;

/// Error type for selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No dishes in category '{0}'")]
    CategoryEmpty(MealCategory),
}

/// Bounded FIFO of the most recently picked dish names.
///
/// Lives for one session only and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentWindow {
    names: VecDeque<String>,
    capacity: usize,
}

impl RecentWindow {
    /// `push` enforces the cap, so only a small buffer is reserved here.
    pub fn new(capacity: usize) -> Self {
        Self {
            names: VecDeque::with_capacity(capacity.min(DEFAULT_RECENT_WINDOW)),
            capacity,
        }
    }

    /// Append a name, evicting the oldest once over capacity.
    pub fn push(&mut self, name: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.names.push_back(name.into());
        while self.names.len() > self.capacity {
            self.names.pop_front();
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Names from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_WINDOW)
    }
}

/// Choose one dish, avoiding names in the recent window when possible.
///
/// Returns `None` only for an empty list.
pub fn choose_dish<'a, R: Rng + ?Sized>(
    dishes: &'a [Dish],
    recent: &RecentWindow,
    rng: &mut R,
) -> Option<&'a Dish> {
    let available: Vec<&Dish> = dishes.iter().filter(|d| !recent.contains(&d.name)).collect();
    if available.is_empty() {
        dishes.choose(rng)
    } else {
        available.choose(rng).copied()
    }
}

/// Choose up to `count` distinct dishes.
///
/// Dishes outside the recent window are preferred as long as they can still
/// fill the rest of the batch; past that point any remaining dish is fair.
pub fn choose_batch<'a, R: Rng + ?Sized>(
    dishes: &'a [Dish],
    recent: &RecentWindow,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Dish> {
    let target = count.min(dishes.len());
    let mut remaining: Vec<&Dish> = dishes.iter().collect();
    let mut picked = Vec::with_capacity(target);

    while picked.len() < target && !remaining.is_empty() {
        let fresh: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(_, d)| !recent.contains(&d.name))
            .map(|(i, _)| i)
            .collect();

        let index = if !fresh.is_empty() && picked.len() + fresh.len() >= target {
            fresh[rng.gen_range(0..fresh.len())]
        } else {
            rng.gen_range(0..remaining.len())
        };

        picked.push(remaining.remove(index));
    }

    picked
}

/// Stateful picker owning the recent window and the RNG.
#[derive(Debug)]
pub struct SelectionEngine<R> {
    recent: RecentWindow,
    rng: R,
}

impl<R: Rng> SelectionEngine<R> {
    pub fn new(window: usize, rng: R) -> Self {
        Self {
            recent: RecentWindow::new(window),
            rng,
        }
    }

    /// Pick one dish from a category and record it.
    ///
    /// The chosen name enters the recent window and is handed to the
    /// history tracker.
    pub fn pick(
        &mut self,
        menu: &Menu,
        category: &MealCategory,
        history: &mut HistoryTracker,
    ) -> Result<Dish, SelectionError> {
        let dish = choose_dish(menu.dishes(category), &self.recent, &mut self.rng)
            .cloned()
            .ok_or_else(|| SelectionError::CategoryEmpty(category.clone()))?;

        debug!(category = %category, dish = %dish.name, "picked dish");
        self.recent.push(dish.name.clone());
        history.record(&dish.name);
        Ok(dish)
    }

    /// Pick up to `count` distinct dishes from a category and record them.
    pub fn pick_many(
        &mut self,
        menu: &Menu,
        category: &MealCategory,
        count: usize,
        history: &mut HistoryTracker,
    ) -> Result<Vec<Dish>, SelectionError> {
        let dishes = menu.dishes(category);
        if dishes.is_empty() {
            return Err(SelectionError::CategoryEmpty(category.clone()));
        }

        let picked: Vec<Dish> = choose_batch(dishes, &self.recent, count, &mut self.rng)
            .into_iter()
            .cloned()
            .collect();

        for dish in &picked {
            debug!(category = %category, dish = %dish.name, "picked dish");
            self.recent.push(dish.name.clone());
            history.record(&dish.name);
        }
        Ok(picked)
    }

    pub fn recent(&self) -> &RecentWindow {
        &self.recent
    }

    pub fn recent_mut(&mut self) -> &mut RecentWindow {
        &mut self.recent
    }
}
