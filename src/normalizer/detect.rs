// file: src/normalizer/detect.rs
// description: adapter from the raw nutrient shapes to one detected entry
// reference: FoodData Central search, abridged and full response formats

use crate::models::raw::RawNutrientEntry;

/// A raw nutrient row after shape detection, before canonical lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedNutrientEntry {
    pub id: u32,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub name: Option<String>,
}

/// Convert one raw row into a detected entry. Rows without a usable numeric
/// identifier yield `None`.
pub fn detect(entry: &RawNutrientEntry) -> Option<DetectedNutrientEntry> {
    match entry {
        RawNutrientEntry::Search(row) => {
            let id = row
                .nutrient_id
                .as_u32()
                .or_else(|| row.nutrient_number.as_ref().and_then(|n| n.as_u32()))?;
            Some(DetectedNutrientEntry {
                id,
                value: row.value,
                unit: row.unit_name.clone(),
                name: row.nutrient_name.clone(),
            })
        }
        RawNutrientEntry::Abridged(row) => Some(DetectedNutrientEntry {
            id: row.number.as_u32()?,
            value: row.value.or(row.amount),
            unit: row.unit_name.clone().or_else(|| row.unit.clone()),
            name: row.name.clone(),
        }),
        RawNutrientEntry::Nested(row) => {
            let info = &row.nutrient;
            let id = info
                .id
                .or_else(|| info.number.as_ref().and_then(|n| n.as_u32()))?;
            Some(DetectedNutrientEntry {
                id,
                value: row.value.or(row.amount),
                unit: info.unit_name.clone(),
                name: info.name.clone(),
            })
        }
        RawNutrientEntry::Unrecognized(_) => None,
    }
}

/// Canonical spelling of the unit labels the source mixes (`G`, `KCAL`, `UG`).
pub fn normalize_unit(unit: &str) -> String {
    let trimmed = unit.trim();
    match trimmed.to_lowercase().as_str() {
        "ug" | "µg" | "μg" | "mcg" => "µg".to_string(),
        "iu" => "IU".to_string(),
        "kj" => "kJ".to_string(),
        "mg_ate" => "mg".to_string(),
        lower => lower.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> RawNutrientEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_detect_search_shape() {
        let detected = detect(&entry(json!({
            "nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 25.0
        })))
        .unwrap();
        assert_eq!(detected.id, 1003);
        assert_eq!(detected.value, Some(25.0));
        assert_eq!(detected.unit.as_deref(), Some("G"));
    }

    #[test]
    fn test_detect_abridged_prefers_value_then_amount() {
        let detected = detect(&entry(json!({
            "number": "203", "name": "Protein", "amount": 25.0, "unit": "g"
        })))
        .unwrap();
        assert_eq!(detected.id, 203);
        assert_eq!(detected.value, Some(25.0));
        assert_eq!(detected.unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_detect_nested_falls_back_to_number() {
        let detected = detect(&entry(json!({
            "nutrient": {"number": "208", "name": "Energy", "unitName": "kcal"},
            "amount": 89
        })))
        .unwrap();
        assert_eq!(detected.id, 208);
        assert_eq!(detected.value, Some(89.0));
    }

    #[test]
    fn test_detect_rejects_unusable_ids() {
        assert!(detect(&entry(json!({"number": "n/a", "amount": 1.0}))).is_none());
        assert!(detect(&entry(json!({"nutrient": {"name": "Mystery"}, "amount": 1.0}))).is_none());
        assert!(detect(&entry(json!({"label": "Protein"}))).is_none());
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(normalize_unit("G"), "g");
        assert_eq!(normalize_unit("KCAL"), "kcal");
        assert_eq!(normalize_unit("UG"), "µg");
        assert_eq!(normalize_unit("mcg"), "µg");
        assert_eq!(normalize_unit("iu"), "IU");
        assert_eq!(normalize_unit(" MG "), "mg");
    }
}
