// file: src/models/food.rs
// description: source-independent food record with canonical nutrients
// reference: internal data structures

use crate::normalizer::keys::NutrientKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a record (or a page of records) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodSource {
    Remote,
    Local,
    None,
    Error,
}

impl fmt::Display for FoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FoodSource::Remote => "remote",
            FoodSource::Local => "local",
            FoodSource::None => "none",
            FoodSource::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single resolved nutrient. `key` is the canonical code, never the raw
/// code the source used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalNutrient {
    pub key: u32,
    pub value: f64,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFood {
    pub id: String,
    pub description: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub data_type: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_size_unit: Option<String>,
    pub household_serving: Option<String>,

    /// Canonical key -> nutrient, only for nutrients the source reported
    pub nutrients: BTreeMap<u32, CanonicalNutrient>,

    pub calories: Option<CanonicalNutrient>,
    pub protein: Option<CanonicalNutrient>,
    pub carbohydrates: Option<CanonicalNutrient>,
    pub fat: Option<CanonicalNutrient>,
    pub fiber: Option<CanonicalNutrient>,
    pub sugar: Option<CanonicalNutrient>,
    pub sodium: Option<CanonicalNutrient>,
    pub saturated_fat: Option<CanonicalNutrient>,
    pub cholesterol: Option<CanonicalNutrient>,

    pub source: FoodSource,
    pub last_updated: DateTime<Utc>,
}

impl NormalizedFood {
    pub fn new(id: impl Into<String>, description: impl Into<String>, source: FoodSource) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            brand: None,
            category: None,
            data_type: None,
            serving_size: None,
            serving_size_unit: None,
            household_serving: None,
            nutrients: BTreeMap::new(),
            calories: None,
            protein: None,
            carbohydrates: None,
            fat: None,
            fiber: None,
            sugar: None,
            sodium: None,
            saturated_fat: None,
            cholesterol: None,
            source,
            last_updated: Utc::now(),
        }
    }

    /// Store a resolved nutrient in the map and mirror it into its
    /// convenience field when it has one.
    pub fn insert_nutrient(&mut self, key: NutrientKey, nutrient: CanonicalNutrient) {
        let slot = match key {
            NutrientKey::Energy => Some(&mut self.calories),
            NutrientKey::Protein => Some(&mut self.protein),
            NutrientKey::Carbohydrate => Some(&mut self.carbohydrates),
            NutrientKey::Fat => Some(&mut self.fat),
            NutrientKey::Fiber => Some(&mut self.fiber),
            NutrientKey::Sugars => Some(&mut self.sugar),
            NutrientKey::Sodium => Some(&mut self.sodium),
            NutrientKey::SaturatedFat => Some(&mut self.saturated_fat),
            NutrientKey::Cholesterol => Some(&mut self.cholesterol),
            _ => None,
        };
        if let Some(slot) = slot {
            *slot = Some(nutrient.clone());
        }
        self.nutrients.insert(key.code(), nutrient);
    }

    pub fn nutrient(&self, key: NutrientKey) -> Option<&CanonicalNutrient> {
        self.nutrients.get(&key.code())
    }

    /// One-line rendering used by the CLI.
    pub fn format_summary(&self) -> String {
        let amount = |n: &Option<CanonicalNutrient>| {
            n.as_ref()
                .map(|n| format!("{:.1}{}", n.value, n.unit))
                .unwrap_or_else(|| "-".to_string())
        };

        let mut title = self.description.clone();
        if let Some(brand) = &self.brand {
            title.push_str(&format!(" ({})", brand));
        }

        format!(
            "{} [{}] {} | protein {} | carbs {} | fat {} | id {}",
            title,
            self.source,
            amount(&self.calories),
            amount(&self.protein),
            amount(&self.carbohydrates),
            amount(&self.fat),
            self.id
        )
    }
}
