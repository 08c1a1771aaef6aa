// file: src/normalizer/mod.rs
// description: nutrient normalization module exports
// reference: internal module structure

pub mod detect;
pub mod keys;
pub mod nutrients;

pub use detect::{DetectedNutrientEntry, detect, normalize_unit};
pub use keys::{NutrientKey, NutrientSet};
pub use nutrients::NutrientNormalizer;
