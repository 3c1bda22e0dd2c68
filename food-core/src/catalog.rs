//! Built-in default menu.
//!
//! The catalog is built once and never handed out by reference to mutating
//! code; [`default_menu`] returns an independent deep copy every time.

use crate::menu::{Dish, MealCategory, Menu, NutritionLevel};

use NutritionLevel::{High as H, Low as L, Medium as M, VeryHigh as VH};

/// Get a fresh copy of the default menu.
pub fn default_menu() -> Menu {
    DEFAULT_MENU.clone()
}

/// Look up a dish in the default catalog.
pub fn default_dish(category: &MealCategory, name: &str) -> Option<Dish> {
    DEFAULT_MENU.find(category, name).cloned()
}

fn dish(name: &str, materials: &[&str], levels: [NutritionLevel; 3], tags: &[&str]) -> Dish {
    let [calorie, protein, fat] = levels;
    Dish::new(name)
        .with_materials(materials.iter().copied())
        .with_level("calorie", calorie)
        .with_level("protein", protein)
        .with_level("fat", fat)
        .with_tags(tags.iter().copied())
}

lazy_static::lazy_static! {
    /// Hangzhou home cooking across the four seasons.
    static ref DEFAULT_MENU: Menu = [
        (MealCategory::breakfast(), vec![
            dish("🍜 片儿川面", &["面条", "笋片", "雪菜", "猪肉片", "高汤"], [M, H, M], &["杭帮", "面食", "经典"]),
            dish("🥟 菜肉大馄饨", &["馄饨皮", "猪肉馅", "青菜", "蛋皮丝"], [M, H, M], &["汤水", "饱腹"]),
            dish("🍞 烧饼夹油条", &["烧饼", "油条", "榨菜"], [H, M, H], &["传统", "油炸"]),
            dish("🥣 小笼包", &["面皮", "猪肉馅", "姜丝醋"], [H, M, M], &["小吃", "汤包"]),
            dish("🍚 泡饭配酱瓜腐乳", &["白米饭", "热水", "酱瓜", "腐乳"], [L, L, L], &["清淡", "简易"]),
            dish("🍚 粢饭团/粢饭糕", &["糯米饭", "油条", "肉松", "咸蛋黄"], [VH, M, H], &["饱腹", "油炸"]),
            dish("🥣 咸豆浆", &["豆浆", "油条碎", "虾皮", "榨菜", "葱花"], [L, M, L], &["清淡", "汤水"]),
            dish("🥟 生煎/葱煎馒头", &["馒头/包子", "葱花", "猪肉馅"], [H, M, H], &["老底子", "油煎"]),
            dish("🍜 葱油拌面", &["面条", "葱油", "酱油", "麻油"], [M, L, M], &["快手", "面食"]),
            dish("🥣 酒酿圆子", &["糯米圆子", "酒酿", "鸡蛋", "桂花"], [M, L, L], &["甜品", "暖身"]),
        ]),
        (MealCategory::lunch(), vec![
            dish("🍜 雪菜笋片肉丝面", &["面条", "雪菜", "笋片", "猪肉丝"], [M, H, M], &["春季", "杭帮", "面食"]),
            dish("🍜 青菜肉丝年糕", &["年糕", "猪肉丝", "青菜", "雪菜"], [H, M, M], &["冬季", "饱腹"]),
            dish("🍚 菜肉泡饭", &["剩饭", "青菜", "咸肉", "高汤"], [M, M, M], &["简易", "剩菜妙用"]),
            dish("🍜 冷淘（凉面）", &["面条", "黄瓜丝", "豆芽", "花生酱", "醋"], [M, M, M], &["夏季", "清淡", "冷食"]),
            dish("🍚 蟹肉炒饭", &["米饭", "蟹肉", "鸡蛋", "葱花"], [H, H, M], &["秋季", "丰腴"]),
            dish("🍜 前日汤下面", &["面条", "腌笃鲜汤底/羊肉汤底", "青菜"], [M, M, L], &["剩菜妙用", "汤面"]),
            dish("🍛 日式咖喱饭", &["鸡肉/牛肉", "土豆", "胡萝卜", "洋葱", "咖喱块", "米饭"], [H, M, M], &["浓郁", "日式"]),
            dish("🥗 鸡胸肉沙拉", &["鸡胸肉", "混合生菜", "小番茄", "低脂油醋汁"], [L, H, L], &["健身", "低卡"]),
        ]),
        (MealCategory::dinner(), vec![
            dish("🍲 腌笃鲜", &["咸肉", "新鲜五花肉", "春笋", "百叶结", "高汤"], [H, H, H], &["春季", "汤煲", "经典"]),
            dish("🍄 油焖春笋", &["春笋", "酱油", "白糖"], [L, L, L], &["春季", "时令", "素食"]),
            dish("🍳 香椿炒蛋", &["香椿芽", "鸡蛋"], [M, M, L], &["春季", "野菜"]),
            dish("🐟 清蒸步鱼", &["步鱼", "葱丝", "姜片", "蒸鱼豉油"], [L, H, L], &["春季", "江鲜", "清淡"]),
            dish("🐚 酱爆螺蛳", &["螺蛳", "葱姜蒜", "酱油", "辣椒"], [M, M, M], &["春季", "小炒"]),
            dish("🥩 荷叶粉蒸肉", &["五花肉", "米粉", "荷叶", "土豆/芋头"], [VH, H, VH], &["夏季", "特色", "香糯"]),
            dish("🦐 盐水河虾", &["新鲜河虾", "葱姜", "盐水"], [L, H, L], &["夏季", "清淡", "水产"]),
            dish("🥒 蒜泥空心菜", &["空心菜", "蒜蓉", "蚝油"], [L, L, L], &["夏季", "时蔬"]),
            dish("🐟 清蒸白丝鱼", &["白丝鱼", "葱姜", "蒸鱼豉油"], [L, H, L], &["夏季", "清淡"]),
            dish("🥣 冬瓜海带汤", &["冬瓜", "海带", "排骨/虾皮"], [L, L, L], &["夏季", "汤水", "低卡"]),
            dish("🦀 清蒸大闸蟹", &["大闸蟹", "姜片", "黄酒", "姜茶"], [H, H, H], &["秋季", "湖鲜", "大餐"]),
            dish("🌰 栗子烧鸡", &["鸡块", "栗子", "酱油", "冰糖"], [H, H, M], &["秋季", "滋补", "浓郁"]),
            dish("🦑 雪菜炒鱿鱼", &["鱿鱼", "雪菜", "笋片", "猪肉丝"], [M, H, M], &["家常", "海鲜"]),
            dish("🧅 葱油芋艿", &["芋艿", "葱花", "猪油/色拉油"], [M, L, M], &["秋季", "时令", "香糯"]),
            dish("🐟 鱼头豆腐汤", &["鱼头", "豆腐", "葱姜", "白胡椒"], [M, H, M], &["滋补", "汤水", "杭帮"]),
            dish("🔥 羊肉煲", &["羊肉", "白萝卜", "葱姜", "黄酒"], [VH, H, VH], &["冬季", "滋补", "暖锅"]),
            dish("🦆 酱鸭", &["鸭子", "酱油", "黄酒", "冰糖"], [H, H, H], &["冬季", "腌腊", "特色"]),
            dish("🥩 笋干烧肉", &["五花肉", "笋干", "酱油", "冰糖"], [VH, H, VH], &["冬季", "浓郁", "下饭"]),
            dish("🐟 红烧带鱼", &["带鱼", "葱姜蒜", "酱油", "糖"], [H, H, H], &["海鲜", "浓郁"]),
            dish("🥬 冬腌菜炒肉片", &["冬腌菜", "猪肉片", "辣椒"], [M, M, L], &["冬季", "家常"]),
            dish("🍲 火锅/暖锅", &["牛羊肉", "丸子", "蔬菜", "豆腐", "粉丝"], [VH, H, VH], &["冬季", "聚餐", "大餐"]),
        ]),
    ]
    .into_iter()
    .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu_categories() {
        let menu = default_menu();
        assert_eq!(menu.dishes(&MealCategory::breakfast()).len(), 10);
        assert_eq!(menu.dishes(&MealCategory::lunch()).len(), 8);
        assert_eq!(menu.dishes(&MealCategory::dinner()).len(), 21);
    }

    #[test]
    fn test_default_names_unique_per_category() {
        let menu = default_menu();
        for (category, dishes) in menu.iter() {
            let mut names: Vec<_> = dishes.iter().map(|d| d.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), dishes.len(), "duplicate name in {category}");
        }
    }

    #[test]
    fn test_copies_are_independent() {
        let mut copy = default_menu();
        copy.remove(&MealCategory::lunch(), "🥗 鸡胸肉沙拉");
        copy.push(MealCategory::lunch(), Dish::new("Leak"));

        let fresh = default_menu();
        assert!(fresh.contains(&MealCategory::lunch(), "🥗 鸡胸肉沙拉"));
        assert!(!fresh.contains(&MealCategory::lunch(), "Leak"));
    }

    #[test]
    fn test_default_dish_lookup() {
        let crab = default_dish(&MealCategory::dinner(), "🦀 清蒸大闸蟹").unwrap();
        assert_eq!(crab.nutrition["protein"], NutritionLevel::High);
        assert!(crab.has_tag("秋季"));
        assert!(default_dish(&MealCategory::breakfast(), "🦀 清蒸大闸蟹").is_none());
    }
}
