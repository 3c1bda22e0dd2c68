//! Rolling "slot machine" display before a pick.
//!
//! The frames are purely cosmetic: they sample the category without
//! touching history or the recent window. Only the final pick is real.

use food_core::{Dish, FoodStore, MealCategory, StoreError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Timing for the shuffle display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleEffect {
    pub frames: usize,
    pub interval: Duration,
}

impl Default for ShuffleEffect {
    fn default() -> Self {
        Self::new(12, Duration::from_millis(80))
    }
}

impl ShuffleEffect {
    pub fn new(frames: usize, interval: Duration) -> Self {
        Self { frames, interval }
    }

    /// Show rolling frames, then pick once from the store.
    ///
    /// The outer error is an output failure; the inner one comes from the
    /// store. An empty category skips the frames.
    pub fn run<W: Write, R: Rng>(
        &self,
        store: &mut FoodStore,
        category: &MealCategory,
        rng: &mut R,
        out: &mut W,
    ) -> io::Result<Result<Dish, StoreError>> {
        for name in sample_frames(store.menu().dishes(category), self.frames, rng) {
            writeln!(out, "  ... {name}")?;
            out.flush()?;
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
        Ok(store.pick(category))
    }
}

/// Names to flash on screen, drawn with replacement.
pub fn sample_frames<R: Rng + ?Sized>(dishes: &[Dish], frames: usize, rng: &mut R) -> Vec<String> {
    if dishes.is_empty() {
        return Vec::new();
    }
    (0..frames)
        .filter_map(|_| dishes.choose(rng))
        .map(|d| d.name.clone())
        .collect()
}
