// file: src/repository/dataset.rs
// description: static reference dataset used when the remote database is unavailable
// reference: values per 100 g (100 ml for drinks) rounded from USDA SR Legacy

/// One row of the local reference dataset. Energy is in kcal, sodium in mg,
/// everything else in grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFood {
    pub id: &'static str,
    pub name: &'static str,
    pub brand: Option<&'static str>,
    pub category: &'static str,
    pub serving_size: f64,
    pub serving_unit: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

#[allow(clippy::too_many_arguments)]
const fn food(
    id: &'static str,
    name: &'static str,
    brand: Option<&'static str>,
    category: &'static str,
    serving_unit: &'static str,
    [calories, protein, carbs, fat, fiber, sugar, sodium]: [f64; 7],
) -> LocalFood {
    LocalFood {
        id,
        name,
        brand,
        category,
        serving_size: 100.0,
        serving_unit,
        calories,
        protein,
        carbs,
        fat,
        fiber,
        sugar,
        sodium,
    }
}

// [kcal, protein, carbs, fat, fiber, sugar, sodium]
pub static LOCAL_FOODS: &[LocalFood] = &[
    food("local_1", "Apple (raw)", None, "Fruits", "g", [52.0, 0.3, 13.8, 0.2, 2.4, 10.4, 1.0]),
    food("local_2", "Banana (raw)", None, "Fruits", "g", [89.0, 1.1, 22.8, 0.3, 2.6, 12.2, 1.0]),
    food("local_3", "Orange (raw)", None, "Fruits", "g", [47.0, 0.9, 11.8, 0.1, 2.4, 9.4, 0.0]),
    food("local_4", "Strawberries (raw)", None, "Fruits", "g", [32.0, 0.7, 7.7, 0.3, 2.0, 4.9, 1.0]),
    food("local_5", "Blueberries (raw)", None, "Fruits", "g", [57.0, 0.7, 14.5, 0.3, 2.4, 10.0, 1.0]),
    food("local_6", "Avocado (raw)", None, "Fruits", "g", [160.0, 2.0, 8.5, 14.7, 6.7, 0.7, 7.0]),
    food("local_7", "Broccoli (raw)", None, "Vegetables", "g", [34.0, 2.8, 6.6, 0.4, 2.6, 1.7, 33.0]),
    food("local_8", "Spinach (raw)", None, "Vegetables", "g", [23.0, 2.9, 3.6, 0.4, 2.2, 0.4, 79.0]),
    food("local_9", "Carrot (raw)", None, "Vegetables", "g", [41.0, 0.9, 9.6, 0.2, 2.8, 4.7, 69.0]),
    food("local_10", "Sweet Potato (baked)", None, "Vegetables", "g", [90.0, 2.0, 20.7, 0.2, 3.3, 6.5, 36.0]),
    food("local_11", "Potato (baked)", None, "Vegetables", "g", [93.0, 2.5, 21.2, 0.1, 2.2, 1.2, 10.0]),
    food("local_12", "Chicken Breast (grilled)", None, "Proteins", "g", [151.0, 30.5, 0.0, 3.2, 0.0, 0.0, 52.0]),
    food("local_13", "Chicken Breast", None, "Proteins", "g", [165.0, 31.0, 0.0, 3.6, 0.0, 0.0, 74.0]),
    food("local_14", "Breaded Chicken Breast", None, "Proteins", "g", [260.0, 18.0, 15.0, 14.0, 0.8, 0.5, 450.0]),
    food("local_15", "Chicken Thigh (roasted)", None, "Proteins", "g", [209.0, 26.0, 0.0, 10.9, 0.0, 0.0, 84.0]),
    food("local_16", "Ground Beef (90% lean, cooked)", None, "Proteins", "g", [217.0, 26.1, 0.0, 11.7, 0.0, 0.0, 72.0]),
    food("local_17", "Salmon (Atlantic, cooked)", None, "Proteins", "g", [206.0, 22.1, 0.0, 12.4, 0.0, 0.0, 61.0]),
    food("local_18", "Tuna (canned in water)", None, "Proteins", "g", [116.0, 25.5, 0.0, 0.8, 0.0, 0.0, 247.0]),
    food("local_19", "Egg (whole, boiled)", None, "Proteins", "g", [155.0, 12.6, 1.1, 10.6, 0.0, 1.1, 124.0]),
    food("local_20", "Tofu (firm)", None, "Proteins", "g", [144.0, 17.3, 2.8, 8.7, 2.3, 0.6, 14.0]),
    food("local_21", "Turkey Breast (roasted)", None, "Proteins", "g", [135.0, 30.1, 0.0, 0.7, 0.0, 0.0, 52.0]),
    food("local_22", "Brown Rice (cooked)", None, "Grains", "g", [123.0, 2.7, 25.6, 1.0, 1.6, 0.2, 4.0]),
    food("local_23", "White Rice (cooked)", None, "Grains", "g", [130.0, 2.7, 28.2, 0.3, 0.4, 0.1, 1.0]),
    food("local_24", "Oatmeal (cooked)", None, "Grains", "g", [71.0, 2.5, 12.0, 1.5, 1.7, 0.3, 4.0]),
    food("local_25", "Quinoa (cooked)", None, "Grains", "g", [120.0, 4.4, 21.3, 1.9, 2.8, 0.9, 7.0]),
    food("local_26", "Whole Wheat Bread", None, "Grains", "g", [247.0, 13.0, 41.0, 3.4, 7.0, 6.0, 450.0]),
    food("local_27", "Pasta (cooked)", None, "Grains", "g", [158.0, 5.8, 30.9, 0.9, 1.8, 0.6, 1.0]),
    food("local_28", "Greek Yogurt (plain, nonfat)", Some("Fage"), "Dairy", "g", [59.0, 10.2, 3.6, 0.4, 0.0, 3.2, 36.0]),
    food("local_29", "Milk (2%)", None, "Dairy", "ml", [50.0, 3.3, 4.8, 2.0, 0.0, 5.1, 47.0]),
    food("local_30", "Cheddar Cheese", None, "Dairy", "g", [403.0, 24.9, 1.3, 33.1, 0.0, 0.5, 621.0]),
    food("local_31", "Cottage Cheese (low fat)", None, "Dairy", "g", [72.0, 12.4, 2.7, 1.0, 0.0, 2.7, 406.0]),
    food("local_32", "Almonds", None, "Nuts & Seeds", "g", [579.0, 21.2, 21.6, 49.9, 12.5, 4.4, 1.0]),
    food("local_33", "Peanut Butter (smooth)", None, "Nuts & Seeds", "g", [588.0, 25.1, 20.0, 50.4, 6.0, 9.2, 459.0]),
    food("local_34", "Chia Seeds", None, "Nuts & Seeds", "g", [486.0, 16.5, 42.1, 30.7, 34.4, 0.0, 16.0]),
    food("local_35", "Black Beans (cooked)", None, "Legumes", "g", [132.0, 8.9, 23.7, 0.5, 8.7, 0.3, 1.0]),
    food("local_36", "Lentils (cooked)", None, "Legumes", "g", [116.0, 9.0, 20.1, 0.4, 7.9, 1.8, 2.0]),
    food("local_37", "Chickpeas (cooked)", None, "Legumes", "g", [164.0, 8.9, 27.4, 2.6, 7.6, 4.8, 7.0]),
    food("local_38", "Olive Oil", None, "Fats & Oils", "g", [884.0, 0.0, 0.0, 100.0, 0.0, 0.0, 2.0]),
    food("local_39", "Butter (salted)", None, "Fats & Oils", "g", [717.0, 0.9, 0.1, 81.1, 0.0, 0.1, 643.0]),
    food("local_40", "Whey Protein Powder", Some("Optimum Nutrition"), "Supplements", "g", [375.0, 78.0, 9.4, 4.7, 0.0, 3.1, 190.0]),
    food("local_41", "Protein Bar", Some("Quest"), "Snacks", "g", [350.0, 33.3, 41.7, 13.3, 23.3, 1.7, 383.0]),
    food("local_42", "Dark Chocolate (70-85%)", None, "Snacks", "g", [598.0, 7.8, 45.9, 42.6, 10.9, 24.0, 20.0]),
    food("local_43", "Orange Juice", None, "Beverages", "ml", [45.0, 0.7, 10.4, 0.2, 0.2, 8.4, 1.0]),
    food("local_44", "Sports Drink", Some("Gatorade"), "Beverages", "ml", [26.0, 0.0, 6.4, 0.0, 0.0, 5.8, 41.0]),
];
