// file: src/cache/mod.rs
// description: result cache and search history module exports
// reference: internal module structure

pub mod history;
pub mod ttl;

pub use history::{HistoryEntry, SearchHistoryTracker};
pub use ttl::{CacheLayer, CacheStats, EvictionPolicy};
