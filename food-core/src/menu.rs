//! Menu data model.
//!
//! A [`Menu`] maps each [`MealCategory`] to an ordered list of [`Dish`]
//! records. Dish names are unique within a category and act as the identity
//! key for lookup, add and remove.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A named bucket of dishes (breakfast, lunch, dinner, ...).
///
/// The set of categories is configuration, so this is an open string
/// newtype rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealCategory(String);

impl MealCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn breakfast() -> Self {
        Self::new("breakfast")
    }

    pub fn lunch() -> Self {
        Self::new("lunch")
    }

    pub fn dinner() -> Self {
        Self::new("dinner")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MealCategory {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MealCategory {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Qualitative nutrition label supplied by the data author.
///
/// Serialized with the author's labels; English spellings are accepted on
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NutritionLevel {
    #[serde(rename = "低", alias = "low")]
    Low,
    #[serde(rename = "中", alias = "medium")]
    Medium,
    #[serde(rename = "高", alias = "high")]
    High,
    #[serde(rename = "极高", alias = "very-high")]
    VeryHigh,
}

impl NutritionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NutritionLevel::Low => "低",
            NutritionLevel::Medium => "中",
            NutritionLevel::High => "高",
            NutritionLevel::VeryHigh => "极高",
        }
    }

    /// Parse either the author's label or its English spelling.
    pub fn from_label(label: &str) -> Option<NutritionLevel> {
        match label.trim() {
            "低" => Some(NutritionLevel::Low),
            "中" => Some(NutritionLevel::Medium),
            "高" => Some(NutritionLevel::High),
            "极高" => Some(NutritionLevel::VeryHigh),
            other => match other.to_lowercase().as_str() {
                "low" => Some(NutritionLevel::Low),
                "medium" => Some(NutritionLevel::Medium),
                "high" => Some(NutritionLevel::High),
                "very-high" | "veryhigh" | "very_high" => Some(NutritionLevel::VeryHigh),
                _ => None,
            },
        }
    }
}

impl fmt::Display for NutritionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nutrient kind (calorie, protein, fat, ...) to label.
pub type Nutrition = BTreeMap<String, NutritionLevel>;

/// Build a [`Nutrition`] map from `(kind, level)` pairs.
pub fn nutrition<'a>(pairs: impl IntoIterator<Item = (&'a str, NutritionLevel)>) -> Nutrition {
    pairs
        .into_iter()
        .map(|(kind, level)| (kind.to_string(), level))
        .collect()
}

/// A named food item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,

    /// Ingredient names, in the order the author listed them.
    #[serde(default)]
    pub materials: Vec<String>,

    #[serde(default)]
    pub nutrition: Nutrition,

    /// Free-form labels; duplicates are dropped on construction.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Dish {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
            nutrition: Nutrition::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_materials<I>(mut self, materials: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_nutrition(mut self, nutrition: Nutrition) -> Self {
        self.nutrition = nutrition;
        self
    }

    pub fn with_level(mut self, kind: impl Into<String>, level: NutritionLevel) -> Self {
        self.nutrition.insert(kind.into(), level);
        self
    }

    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Categorized dish catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    categories: BTreeMap<MealCategory, Vec<Dish>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dishes in a category, empty if the category does not exist.
    pub fn dishes(&self, category: &MealCategory) -> &[Dish] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &MealCategory> {
        self.categories.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MealCategory, &[Dish])> {
        self.categories.iter().map(|(c, d)| (c, d.as_slice()))
    }

    pub fn has_category(&self, category: &MealCategory) -> bool {
        self.categories.contains_key(category)
    }

    pub fn find(&self, category: &MealCategory, name: &str) -> Option<&Dish> {
        self.dishes(category).iter().find(|d| d.name == name)
    }

    pub fn contains(&self, category: &MealCategory, name: &str) -> bool {
        self.find(category, name).is_some()
    }

    /// Whether any category holds a dish with this name.
    pub fn contains_anywhere(&self, name: &str) -> bool {
        self.categories.values().flatten().any(|d| d.name == name)
    }

    /// Make sure the category exists, creating an empty list if needed.
    pub fn ensure_category(&mut self, category: MealCategory) {
        self.categories.entry(category).or_default();
    }

    /// Append a dish, creating the category on demand.
    ///
    /// Returns `false` without changing anything if the name is taken.
    pub fn push(&mut self, category: MealCategory, dish: Dish) -> bool {
        if self.contains(&category, &dish.name) {
            return false;
        }
        self.categories.entry(category).or_default().push(dish);
        true
    }

    /// Remove the dish with this name from the category.
    pub fn remove(&mut self, category: &MealCategory, name: &str) -> Option<Dish> {
        let dishes = self.categories.get_mut(category)?;
        let index = dishes.iter().position(|d| d.name == name)?;
        Some(dishes.remove(index))
    }

    /// Drop repeated names within each category, keeping the first.
    ///
    /// Returns how many dishes were dropped.
    pub fn dedupe(&mut self) -> usize {
        let mut dropped = 0;
        for dishes in self.categories.values_mut() {
            let mut seen = HashSet::new();
            let before = dishes.len();
            dishes.retain(|d| seen.insert(d.name.clone()));
            dropped += before - dishes.len();
        }
        dropped
    }

    pub fn total_dishes(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_dishes() == 0
    }
}

impl FromIterator<(MealCategory, Vec<Dish>)> for Menu {
    fn from_iter<T: IntoIterator<Item = (MealCategory, Vec<Dish>)>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

/// Materials needed for a set of dishes, each listed once in first-seen order.
pub fn shopping_list<'a>(dishes: impl IntoIterator<Item = &'a Dish>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut list = Vec::new();
    for material in dishes.into_iter().flat_map(|d| d.materials.iter()) {
        if seen.insert(material.as_str()) {
            list.push(material.clone());
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_per_category() {
        let mut menu: Menu = [
            (
                MealCategory::lunch(),
                vec![
                    Dish::new("Rice").with_tags(["first"]),
                    Dish::new("Noodles"),
                    Dish::new("Rice").with_tags(["second"]),
                ],
            ),
            (MealCategory::dinner(), vec![Dish::new("Rice")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(menu.dedupe(), 1);
        assert_eq!(menu.dishes(&MealCategory::lunch()).len(), 2);
        assert!(menu.find(&MealCategory::lunch(), "Rice").unwrap().has_tag("first"));
        assert!(menu.contains(&MealCategory::dinner(), "Rice"));
        assert_eq!(menu.dedupe(), 0);
    }

    #[test]
    fn test_shopping_list_dedupes_in_order() {
        let dishes = [
            Dish::new("Fried rice").with_materials(["rice", "egg", "scallion"]),
            Dish::new("Egg soup").with_materials(["egg", "tomato"]),
            Dish::new("Plain"),
        ];
        assert_eq!(
            shopping_list(&dishes),
            vec!["rice", "egg", "scallion", "tomato"]
        );
        assert!(shopping_list(&[] as &[Dish]).is_empty());
    }

    fn sample_menu() -> Menu {
        let mut menu = Menu::new();
        menu.push(MealCategory::lunch(), Dish::new("Noodles"));
        menu.push(MealCategory::lunch(), Dish::new("Rice"));
        menu
    }

    #[test]
    fn test_push_creates_category() {
        let mut menu = Menu::new();
        assert!(!menu.has_category(&MealCategory::dinner()));

        assert!(menu.push(MealCategory::dinner(), Dish::new("Soup")));
        assert_eq!(menu.dishes(&MealCategory::dinner()).len(), 1);
    }

    #[test]
    fn test_push_rejects_duplicate_name() {
        let mut menu = sample_menu();
        let dup = Dish::new("Rice").with_materials(["rice", "water"]);

        assert!(!menu.push(MealCategory::lunch(), dup));
        let rice = menu.find(&MealCategory::lunch(), "Rice").unwrap();
        assert!(rice.materials.is_empty());
        assert_eq!(menu.dishes(&MealCategory::lunch()).len(), 2);
    }

    #[test]
    fn test_same_name_allowed_across_categories() {
        let mut menu = sample_menu();
        assert!(menu.push(MealCategory::dinner(), Dish::new("Rice")));
        assert_eq!(menu.total_dishes(), 3);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut menu = sample_menu();
        menu.push(MealCategory::lunch(), Dish::new("Dumplings"));

        let removed = menu.remove(&MealCategory::lunch(), "Rice");
        assert_eq!(removed.map(|d| d.name), Some("Rice".to_string()));

        let names: Vec<_> = menu
            .dishes(&MealCategory::lunch())
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Noodles", "Dumplings"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut menu = sample_menu();
        assert!(menu.remove(&MealCategory::lunch(), "Pizza").is_none());
        assert!(menu.remove(&MealCategory::breakfast(), "Rice").is_none());
        assert_eq!(menu.total_dishes(), 2);
    }

    #[test]
    fn test_dishes_of_unknown_category_is_empty() {
        let menu = sample_menu();
        assert!(menu.dishes(&MealCategory::new("supper")).is_empty());
    }

    #[test]
    fn test_tags_deduplicated() {
        let dish = Dish::new("Tea").with_tags(["hot", "drink", "hot"]);
        assert_eq!(dish.tags, vec!["hot".to_string(), "drink".to_string()]);
        assert!(dish.has_tag("drink"));
    }

    #[test]
    fn test_nutrition_level_labels() {
        assert_eq!(NutritionLevel::from_label("低"), Some(NutritionLevel::Low));
        assert_eq!(NutritionLevel::from_label("极高"), Some(NutritionLevel::VeryHigh));
        assert_eq!(NutritionLevel::from_label("High"), Some(NutritionLevel::High));
        assert_eq!(NutritionLevel::from_label("very-high"), Some(NutritionLevel::VeryHigh));
        assert_eq!(NutritionLevel::from_label("huge"), None);
        assert!(NutritionLevel::Low < NutritionLevel::VeryHigh);
    }

    #[test]
    fn test_dish_json_shape() {
        let dish = Dish::new("Soup")
            .with_materials(["Water", "Salt"])
            .with_level("calorie", NutritionLevel::Low);

        let json = serde_json::to_value(&dish).unwrap();
        assert_eq!(json["name"], "Soup");
        assert_eq!(json["materials"][1], "Salt");
        assert_eq!(json["nutrition"]["calorie"], "低");
        assert!(json["tags"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_dish_accepts_english_levels_and_missing_fields() {
        let dish: Dish =
            serde_json::from_str(r#"{"name":"Toast","nutrition":{"fat":"medium"}}"#).unwrap();
        assert_eq!(dish.nutrition["fat"], NutritionLevel::Medium);
        assert!(dish.materials.is_empty());
        assert!(dish.tags.is_empty());
    }

    #[test]
    fn test_menu_serializes_as_plain_mapping() {
        let menu = sample_menu();
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["lunch"][0]["name"], "Noodles");

        let back: Menu = serde_json::from_value(json).unwrap();
        assert_eq!(back, menu);
    }
}
