// file: src/models/raw.rs
// description: wire shapes emitted by the FoodData Central API
// reference: https://fdc.nal.usda.gov/api-guide.html

use serde::{Deserialize, Serialize};

/// Nutrient identifier as it appears on the wire: an integer in the search
/// shape, a numeric string in the abridged shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientCode {
    Number(u32),
    Text(String),
}

impl NutrientCode {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            NutrientCode::Number(n) => Some(*n),
            NutrientCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// `GET /foods/search` nutrient row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchShapeNutrient {
    pub nutrient_id: NutrientCode,
    #[serde(default)]
    pub nutrient_number: Option<NutrientCode>,
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// `GET /food/{id}?format=abridged` nutrient row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbridgedShapeNutrient {
    pub number: NutrientCode,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedNutrientInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub number: Option<NutrientCode>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

/// `GET /food/{id}?format=full` nutrient row. The top-level `id` of this
/// shape identifies the measurement record, not the nutrient, so it is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedShapeNutrient {
    pub nutrient: NestedNutrientInfo,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// One nutrient row in any of the shapes the remote source emits.
///
/// Variant order matters: each shape is recognized by its one required field
/// (`nutrientId`, `number`, `nutrient`), anything else lands in `Unrecognized`
/// so a single odd row never fails the whole food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNutrientEntry {
    Search(SearchShapeNutrient),
    Abridged(AbridgedShapeNutrient),
    Nested(NestedShapeNutrient),
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Name(String),
    Described {
        #[serde(default)]
        description: Option<String>,
    },
}

impl RawCategory {
    pub fn label(&self) -> Option<&str> {
        match self {
            RawCategory::Name(name) => Some(name.as_str()),
            RawCategory::Described { description } => description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WweiaCategory {
    #[serde(default)]
    pub wweia_food_category_description: Option<String>,
}

/// A food record from either the search or the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFood {
    pub fdc_id: Option<u64>,
    pub description: Option<String>,
    pub data_type: Option<String>,
    pub brand_owner: Option<String>,
    pub brand_name: Option<String>,
    pub food_category: Option<RawCategory>,
    pub wweia_food_category: Option<WweiaCategory>,
    pub serving_size: Option<f64>,
    pub serving_size_unit: Option<String>,
    pub household_serving_full_text: Option<String>,
    pub food_nutrients: Vec<RawNutrientEntry>,
}

/// Body of `GET /foods/search`. Foods stay as raw JSON so that one malformed
/// record degrades on its own during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSearchResponse {
    pub foods: Vec<serde_json::Value>,
    pub total_hits: usize,
    pub current_page: Option<usize>,
    pub total_pages: Option<usize>,
}
