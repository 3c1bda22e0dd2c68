//! QA tests for picking, history and menu editing through the facade.
//!
//! Run with: `cargo test -p food-core --test qa_store_flow`

use food_core::testing::{
    assert_category_len, assert_history_unique, assert_recent_bounded, menu_with, StoreHarness,
};
use food_core::{catalog, nutrition, MealCategory, Nutrition, NutritionLevel, StoreConfig};
use std::collections::HashSet;

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_three_picks_from_five_are_distinct() {
    let mut harness = StoreHarness::with_menu(&menu_with("breakfast", &["a", "b", "c", "d", "e"]));

    let names = harness.pick_names("breakfast", 3);

    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), 3, "expected 3 distinct picks, got {names:?}");
    assert_eq!(harness.store.history(), names.as_slice());
    assert_history_unique(&harness.store);
}

#[test]
fn test_pick_never_returns_recent_name() {
    let mut harness = StoreHarness::with_menu(&menu_with("lunch", &["a", "b", "c", "d"]));
    let lunch = MealCategory::lunch();

    for _ in 0..300 {
        let recent: Vec<String> = harness.store.recent().to_vec();
        let dish = harness.store.pick(&lunch).unwrap();
        assert!(
            !recent.contains(&dish.name),
            "picked {} while recent was {recent:?}",
            dish.name
        );
        assert_recent_bounded(&harness.store);
    }
}

#[test]
fn test_single_dish_category_always_returns_it() {
    let mut harness = StoreHarness::with_menu(&menu_with("dinner", &["only"]));

    for name in harness.pick_names("dinner", 10) {
        assert_eq!(name, "only");
    }
    assert_eq!(harness.store.recent().to_vec(), vec!["only", "only", "only"]);
    assert_eq!(harness.store.history(), ["only".to_string()]);
}

#[test]
fn test_small_category_falls_back_without_failing() {
    let mut harness = StoreHarness::with_menu(&menu_with("dinner", &["x", "y"]));

    let names = harness.pick_names("dinner", 20);
    assert_eq!(names.len(), 20);
    assert_history_unique(&harness.store);
    assert_eq!(harness.store.history().len(), 2);
}

#[test]
fn test_history_unique_under_many_picks() {
    let mut harness = StoreHarness::new();
    harness.pick_names("lunch", 100);

    assert_history_unique(&harness.store);
    assert!(harness.store.history().len() <= catalog::default_menu().dishes(&MealCategory::lunch()).len());
}

#[test]
fn test_pick_empty_category_is_rejected() {
    let mut harness = StoreHarness::with_menu(&menu_with("breakfast", &["a"]));
    let lunch = MealCategory::lunch();

    let err = harness.store.pick(&lunch).unwrap_err();
    assert_eq!(err.empty_category(), Some(&lunch));
    assert!(harness.store.history().is_empty());
    assert!(harness.store.recent().is_empty());

    let err = harness.store.pick_many(&lunch, 2).unwrap_err();
    assert_eq!(err.empty_category(), Some(&lunch));
}

#[test]
fn test_pick_many_distinct_and_recorded() {
    let mut harness = StoreHarness::with_config(
        StoreConfig::new().with_seed(99).with_recent_window(5),
    );
    let dinner = MealCategory::dinner();

    let dishes = harness.store.pick_many(&dinner, 4).unwrap();
    let names: Vec<String> = dishes.iter().map(|d| d.name.clone()).collect();
    let unique: HashSet<_> = names.iter().collect();

    assert_eq!(dishes.len(), 4);
    assert_eq!(unique.len(), 4);
    assert_eq!(harness.store.history(), names.as_slice());
    assert_eq!(harness.store.recent().to_vec(), names);
}

#[test]
fn test_pick_many_capped_at_category_size() {
    let mut harness = StoreHarness::with_menu(&menu_with("lunch", &["a", "b"]));
    let dishes = harness.store.pick_many(&MealCategory::lunch(), 5).unwrap();
    assert_eq!(dishes.len(), 2);
}

#[test]
fn test_seeded_stores_pick_identically() {
    let mut a = StoreHarness::with_config(StoreConfig::new().with_seed(2024));
    let mut b = StoreHarness::with_config(StoreConfig::new().with_seed(2024));

    assert_eq!(a.pick_names("dinner", 15), b.pick_names("dinner", 15));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_clear_history_resets_everything() {
    let mut harness = StoreHarness::new();
    harness.pick_names("breakfast", 3);
    assert!(harness.persisted("today-food-history").is_some());

    harness.store.clear_history();

    assert!(harness.store.history().is_empty());
    assert!(harness.store.recent().is_empty());
    assert!(harness.persisted("today-food-history").is_none());

    harness.reload();
    assert!(harness.store.history().is_empty());
}

// =============================================================================
// Menu editing
// =============================================================================

#[test]
fn test_duplicate_add_keeps_original() {
    let mut harness = StoreHarness::new();
    let dinner = MealCategory::dinner();
    let before = harness.store.menu().dishes(&dinner).len();

    assert!(harness.store.add_dish(
        "dinner",
        "Soup",
        ["Water", "Salt"],
        nutrition([("calorie", NutritionLevel::Low)]),
        Vec::<String>::new(),
    ));
    assert!(!harness.store.add_dish(
        "dinner",
        "Soup",
        ["Bone", "Ginger"],
        nutrition([("calorie", NutritionLevel::High)]),
        Vec::<String>::new(),
    ));

    let soups: Vec<_> = harness
        .store
        .menu()
        .dishes(&dinner)
        .iter()
        .filter(|d| d.name == "Soup")
        .collect();
    assert_eq!(soups.len(), 1);
    assert_eq!(soups[0].materials, vec!["Water", "Salt"]);
    assert_category_len(&harness.store, "dinner", before + 1);
}

#[test]
fn test_add_then_remove_restores_category() {
    let mut harness = StoreHarness::new();
    let lunch = MealCategory::lunch();
    let before = harness.store.menu().dishes(&lunch).to_vec();

    harness
        .store
        .add_dish("lunch", "X", ["x"], Nutrition::new(), ["tag"]);
    assert!(harness.store.remove_dish(&lunch, "X"));

    assert_eq!(harness.store.menu().dishes(&lunch), before.as_slice());
}

#[test]
fn test_remove_missing_is_noop() {
    let mut harness = StoreHarness::new();
    assert!(!harness.store.remove_dish(&MealCategory::lunch(), "ghost"));
    assert!(!harness.store.remove_dish(&MealCategory::new("supper"), "ghost"));
    assert!(harness.persisted("user-menu-data").is_none());
}

#[test]
fn test_add_creates_new_category() {
    let mut harness = StoreHarness::new();
    harness
        .store
        .add_dish("snack", "Peanuts", Vec::<String>::new(), Nutrition::new(), Vec::<String>::new());

    assert_category_len(&harness.store, "snack", 1);
    let name = harness.store.pick(&MealCategory::new("snack")).unwrap().name;
    assert_eq!(name, "Peanuts");
}

#[test]
fn test_reset_does_not_leak_into_defaults() {
    let mut harness = StoreHarness::new();
    harness.store.reset_menu();
    harness
        .store
        .add_dish("breakfast", "Leaky", ["drip"], Nutrition::new(), Vec::<String>::new());
    let first = harness.names_in("dinner")[0].clone();
    harness.store.remove_dish(&MealCategory::dinner(), &first);

    harness.store.reset_menu();

    assert_eq!(harness.store.menu(), &catalog::default_menu());
    assert!(!catalog::default_menu().contains(&MealCategory::breakfast(), "Leaky"));
}

#[test]
fn test_removed_dish_stays_in_history() {
    let mut harness = StoreHarness::with_menu(&menu_with("lunch", &["a", "b", "c", "d"]));
    let name = harness.pick_names("lunch", 1).remove(0);

    assert!(harness.store.remove_dish(&MealCategory::lunch(), &name));
    assert_eq!(harness.store.history(), [name.clone()]);
    assert!(harness.store.recent().contains(&name));
}

// =============================================================================
// Plan
// =============================================================================

#[test]
fn test_plan_round_trip() {
    let mut harness = StoreHarness::new();
    let lunch = MealCategory::lunch();
    let dishes = harness.store.pick_many(&lunch, 2).unwrap();

    assert!(harness.store.set_plan(&lunch, dishes.clone()));
    harness.reload();

    assert_eq!(harness.store.plan().dishes(&lunch), dishes.as_slice());
}
