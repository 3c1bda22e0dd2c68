//! Walk through a seeded pick session over in-memory storage.

use food_core::{nutrition, FoodStore, MealCategory, MemoryStorage, NutritionLevel, StoragePort, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=food_core=debug shows storage traffic
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Today Food: pick session ===\n");

    let storage = MemoryStorage::new();
    let config = StoreConfig::new().with_seed(2024);
    let mut store = FoodStore::with_storage(config.clone(), StoragePort::new(storage.clone()));
    store.subscribe(|event| println!("   [event] {event:?}"));

    println!("1. Picking breakfast three times...");
    for _ in 0..3 {
        let dish = store.pick(&MealCategory::breakfast())?;
        println!("   {} ({})", dish.name, dish.materials.join(", "));
    }
    println!("   Recent window: {:?}", store.recent().to_vec());

    println!("\n2. Planning dinner for two...");
    let dinner = store.pick_many(&MealCategory::dinner(), 2)?;
    store.set_plan(&MealCategory::dinner(), dinner);
    for dish in store.plan().dishes(&MealCategory::dinner()) {
        println!("   {}", dish.name);
    }

    println!("\n3. Adding a custom dish...");
    store.add_dish(
        "dinner",
        "🍲 番茄蛋汤",
        ["番茄", "鸡蛋", "葱花"],
        nutrition([("calorie", NutritionLevel::Low), ("protein", NutritionLevel::Medium)]),
        ["家常", "汤水"],
    );

    println!("\n4. Reopening over the same storage...");
    let reopened = FoodStore::with_storage(config, StoragePort::new(storage));
    println!("   History: {:?}", reopened.history());
    println!(
        "   Custom dish survived: {}",
        reopened.dish(&MealCategory::dinner(), "🍲 番茄蛋汤").is_some()
    );
    println!("   Recent window starts empty: {}", reopened.recent().is_empty());

    println!("\n=== Done ===");
    Ok(())
}
