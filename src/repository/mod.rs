// file: src/repository/mod.rs
// description: local nutrient repository module exports
// reference: internal module structure

pub mod dataset;
pub mod local;

pub use dataset::{LOCAL_FOODS, LocalFood};
pub use local::LocalNutrientRepository;
