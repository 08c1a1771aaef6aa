// file: src/normalizer/keys.rs
// description: canonical nutrient keys and their legacy/modern alias codes
// reference: https://fdc.nal.usda.gov/portal-data/external/dataDictionary

use serde::{Deserialize, Serialize};

/// Nutrients the service resolves. The canonical numeric key of each is the
/// modern FoodData Central nutrient id; the legacy SR number is an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Energy,
    Protein,
    Carbohydrate,
    Fat,
    Fiber,
    Sugars,
    Sodium,
    SaturatedFat,
    Cholesterol,
    VitaminA,
    VitaminC,
    Calcium,
    Iron,
    Potassium,
    Magnesium,
    Phosphorus,
    Zinc,
    VitaminE,
    VitaminK,
    Folate,
    VitaminB12,
    MonounsaturatedFat,
    PolyunsaturatedFat,
    TransFat,
}

struct KeyInfo {
    aliases: &'static [u32],
    name: &'static str,
    unit: &'static str,
}

impl NutrientKey {
    pub const BASIC: [NutrientKey; 13] = [
        NutrientKey::Energy,
        NutrientKey::Protein,
        NutrientKey::Carbohydrate,
        NutrientKey::Fat,
        NutrientKey::Fiber,
        NutrientKey::Sugars,
        NutrientKey::Sodium,
        NutrientKey::SaturatedFat,
        NutrientKey::Cholesterol,
        NutrientKey::VitaminA,
        NutrientKey::VitaminC,
        NutrientKey::Calcium,
        NutrientKey::Iron,
    ];

    pub const EXTENDED: [NutrientKey; 11] = [
        NutrientKey::Potassium,
        NutrientKey::Magnesium,
        NutrientKey::Phosphorus,
        NutrientKey::Zinc,
        NutrientKey::VitaminE,
        NutrientKey::VitaminK,
        NutrientKey::Folate,
        NutrientKey::VitaminB12,
        NutrientKey::MonounsaturatedFat,
        NutrientKey::PolyunsaturatedFat,
        NutrientKey::TransFat,
    ];

    // First alias is the canonical key.
    const fn info(self) -> KeyInfo {
        let (aliases, name, unit): (&'static [u32], &'static str, &'static str) = match self {
            NutrientKey::Energy => (&[1008, 208], "Energy", "kcal"),
            NutrientKey::Protein => (&[1003, 203], "Protein", "g"),
            NutrientKey::Carbohydrate => (&[1005, 205], "Carbohydrate, by difference", "g"),
            NutrientKey::Fat => (&[1004, 204], "Total lipid (fat)", "g"),
            NutrientKey::Fiber => (&[1079, 291], "Fiber, total dietary", "g"),
            NutrientKey::Sugars => (&[2000, 269], "Sugars, total", "g"),
            NutrientKey::Sodium => (&[1093, 307], "Sodium, Na", "mg"),
            NutrientKey::SaturatedFat => (&[1258, 606], "Fatty acids, total saturated", "g"),
            NutrientKey::Cholesterol => (&[1253, 601], "Cholesterol", "mg"),
            NutrientKey::VitaminA => (&[1106, 318], "Vitamin A, RAE", "µg"),
            NutrientKey::VitaminC => (&[1162, 401], "Vitamin C, total ascorbic acid", "mg"),
            NutrientKey::Calcium => (&[1087, 301], "Calcium, Ca", "mg"),
            NutrientKey::Iron => (&[1089, 303], "Iron, Fe", "mg"),
            NutrientKey::Potassium => (&[1092, 306], "Potassium, K", "mg"),
            NutrientKey::Magnesium => (&[1090, 304], "Magnesium, Mg", "mg"),
            NutrientKey::Phosphorus => (&[1091, 305], "Phosphorus, P", "mg"),
            NutrientKey::Zinc => (&[1095, 309], "Zinc, Zn", "mg"),
            NutrientKey::VitaminE => (&[1109, 323], "Vitamin E (alpha-tocopherol)", "mg"),
            NutrientKey::VitaminK => (&[1185, 430], "Vitamin K (phylloquinone)", "µg"),
            NutrientKey::Folate => (&[1177, 417], "Folate, total", "µg"),
            NutrientKey::VitaminB12 => (&[1178, 418], "Vitamin B-12", "µg"),
            NutrientKey::MonounsaturatedFat => {
                (&[1292, 645], "Fatty acids, total monounsaturated", "g")
            }
            NutrientKey::PolyunsaturatedFat => {
                (&[1293, 646], "Fatty acids, total polyunsaturated", "g")
            }
            NutrientKey::TransFat => (&[1257, 605], "Fatty acids, total trans", "g"),
        };
        KeyInfo {
            aliases,
            name,
            unit,
        }
    }

    pub const fn code(self) -> u32 {
        self.info().aliases[0]
    }

    pub const fn aliases(self) -> &'static [u32] {
        self.info().aliases
    }

    pub const fn display_name(self) -> &'static str {
        self.info().name
    }

    pub const fn default_unit(self) -> &'static str {
        self.info().unit
    }

    pub fn accepts(self, id: u32) -> bool {
        self.aliases().contains(&id)
    }
}

/// Which nutrients a normalized record carries in its map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NutrientSet {
    /// Search results and abridged details
    #[default]
    Basic,
    /// Full detail views
    Extended,
}

impl NutrientSet {
    pub fn keys(self) -> impl Iterator<Item = NutrientKey> {
        let extended: &'static [NutrientKey] = match self {
            NutrientSet::Basic => &[],
            NutrientSet::Extended => &NutrientKey::EXTENDED,
        };
        NutrientKey::BASIC.iter().chain(extended.iter()).copied()
    }
}
