// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod food;
pub mod raw;
pub mod search_result;

pub use food::{CanonicalNutrient, FoodSource, NormalizedFood};
pub use raw::{RawFood, RawNutrientEntry, RawSearchResponse};
pub use search_result::{DataType, DetailFormat, SearchOptions, SearchResult};
