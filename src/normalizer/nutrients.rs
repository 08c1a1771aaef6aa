// file: src/normalizer/nutrients.rs
// description: maps raw remote and local food records onto the canonical shape
// reference: FoodData Central nutrient numbering (legacy SR and modern ids)

use crate::models::food::{CanonicalNutrient, FoodSource, NormalizedFood};
use crate::models::raw::{RawFood, RawNutrientEntry};
use crate::normalizer::detect::{DetectedNutrientEntry, detect, normalize_unit};
use crate::normalizer::keys::{NutrientKey, NutrientSet};
use crate::repository::dataset::LocalFood;
use serde_json::Value;
use tracing::{debug, warn};

const UNKNOWN_DESCRIPTION: &str = "Unknown food";

pub struct NutrientNormalizer;

impl NutrientNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// First entry, in source order, whose identifier belongs to the alias
    /// set of `key` and which carries a value.
    pub fn extract_canonical(
        &self,
        entries: &[RawNutrientEntry],
        key: NutrientKey,
    ) -> Option<CanonicalNutrient> {
        let detected: Vec<DetectedNutrientEntry> = entries.iter().filter_map(detect).collect();
        self.extract_detected(&detected, key)
    }

    fn extract_detected(
        &self,
        entries: &[DetectedNutrientEntry],
        key: NutrientKey,
    ) -> Option<CanonicalNutrient> {
        entries
            .iter()
            .filter(|entry| key.accepts(entry.id))
            .find_map(|entry| {
                let value = entry.value?;
                let unit = entry
                    .unit
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .map(normalize_unit)
                    .unwrap_or_else(|| key.default_unit().to_string());
                let name = entry
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(key.display_name())
                    .to_string();

                Some(CanonicalNutrient {
                    key: key.code(),
                    value,
                    unit,
                    name,
                })
            })
    }

    /// Normalize a remote food given as raw JSON. A record that does not match
    /// the expected shape degrades to an identity-only record.
    pub fn normalize(&self, raw: &Value, set: NutrientSet) -> NormalizedFood {
        match serde_json::from_value::<RawFood>(raw.clone()) {
            Ok(food) => self.normalize_food(&food, set),
            Err(e) => {
                warn!("Tolerating malformed food record: {}", e);
                self.degraded(raw)
            }
        }
    }

    pub fn normalize_food(&self, raw: &RawFood, set: NutrientSet) -> NormalizedFood {
        let id = raw
            .fdc_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let description = raw
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DESCRIPTION);

        let mut food = NormalizedFood::new(id, description, FoodSource::Remote);
        food.brand = raw.brand_owner.clone().or_else(|| raw.brand_name.clone());
        food.category = raw
            .food_category
            .as_ref()
            .and_then(|c| c.label())
            .or_else(|| {
                raw.wweia_food_category
                    .as_ref()
                    .and_then(|c| c.wweia_food_category_description.as_deref())
            })
            .map(str::to_string);
        food.data_type = raw.data_type.clone();
        food.serving_size = raw.serving_size;
        food.serving_size_unit = raw.serving_size_unit.as_deref().map(normalize_unit);
        food.household_serving = raw.household_serving_full_text.clone();

        let detected: Vec<DetectedNutrientEntry> =
            raw.food_nutrients.iter().filter_map(detect).collect();
        let skipped = raw.food_nutrients.len() - detected.len();
        if skipped > 0 {
            debug!(
                "Food {}: {} nutrient rows without a usable identifier",
                food.id, skipped
            );
        }

        for key in set.keys() {
            if let Some(nutrient) = self.extract_detected(&detected, key) {
                food.insert_nutrient(key, nutrient);
            }
        }

        food
    }

    /// Local records are single-shape, so this is a direct field copy.
    pub fn normalize_local(&self, item: &LocalFood) -> NormalizedFood {
        let mut food = NormalizedFood::new(item.id, item.name, FoodSource::Local);
        food.brand = item.brand.map(str::to_string);
        food.category = Some(item.category.to_string());
        food.data_type = Some("Local".to_string());
        food.serving_size = Some(item.serving_size);
        food.serving_size_unit = Some(item.serving_unit.to_string());

        let values = [
            (NutrientKey::Energy, item.calories),
            (NutrientKey::Protein, item.protein),
            (NutrientKey::Carbohydrate, item.carbs),
            (NutrientKey::Fat, item.fat),
            (NutrientKey::Fiber, item.fiber),
            (NutrientKey::Sugars, item.sugar),
            (NutrientKey::Sodium, item.sodium),
        ];

        for (key, value) in values {
            food.insert_nutrient(
                key,
                CanonicalNutrient {
                    key: key.code(),
                    value,
                    unit: key.default_unit().to_string(),
                    name: key.display_name().to_string(),
                },
            );
        }

        food
    }

    fn degraded(&self, raw: &Value) -> NormalizedFood {
        let id = match raw.get("fdcId") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => "unknown".to_string(),
        };
        let description = raw
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DESCRIPTION);

        NormalizedFood::new(id, description, FoodSource::Remote)
    }
}

impl Default for NutrientNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
