// file: src/remote/mod.rs
// description: remote nutrient database client module exports
// reference: internal module structure

pub mod client;
pub mod fdc;

pub use client::RemoteNutrientClient;
pub use fdc::{DEFAULT_BASE_URL, FoodDataCentralClient};
