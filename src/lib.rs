// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod remote;
pub mod repository;
pub mod utils;

pub use cache::{CacheLayer, CacheStats, EvictionPolicy, HistoryEntry, SearchHistoryTracker};
pub use config::{CacheConfig, Config, HistoryConfig, RemoteConfig, SearchConfig};
pub use error::{NetworkError, NutritionError, Result};
pub use models::{
    CanonicalNutrient, DataType, DetailFormat, FoodSource, NormalizedFood, RawFood,
    RawNutrientEntry, RawSearchResponse, SearchOptions, SearchResult,
};
pub use normalizer::{DetectedNutrientEntry, NutrientKey, NutrientNormalizer, NutrientSet};
pub use pipeline::{SearchOrchestrator, SearchPreference, ServiceStats};
pub use remote::{FoodDataCentralClient, RemoteNutrientClient};
pub use repository::LocalNutrientRepository;
pub use utils::{OperationTimer, Validator};
