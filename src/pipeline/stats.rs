// file: src/pipeline/stats.rs
// description: search preference toggle and service statistics snapshot
// reference: reporting of cache and history state

use crate::cache::CacheStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order in which sources are consulted for searches.
///
/// `LocalFirst` never reaches the remote database for searches, even when the
/// local dataset has nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPreference {
    #[default]
    RemoteFirst,
    LocalFirst,
}

impl SearchPreference {
    pub fn from_remote_first(prefer_remote_first: bool) -> Self {
        if prefer_remote_first {
            SearchPreference::RemoteFirst
        } else {
            SearchPreference::LocalFirst
        }
    }

    pub fn is_remote_first(self) -> bool {
        self == SearchPreference::RemoteFirst
    }
}

impl fmt::Display for SearchPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPreference::RemoteFirst => f.write_str("remote-first"),
            SearchPreference::LocalFirst => f.write_str("local-first"),
        }
    }
}

impl FromStr for SearchPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "remote-first" | "remote_first" => Ok(SearchPreference::RemoteFirst),
            "local" | "local-first" | "local_first" => Ok(SearchPreference::LocalFirst),
            other => Err(format!("unknown search preference: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Entries held across both caches
    pub cache_size: usize,
    pub history_count: usize,
    pub has_api_key: bool,
    pub preference: SearchPreference,
    pub search_cache: CacheStats,
    pub details_cache: CacheStats,
}

impl ServiceStats {
    /// Percentage of cache reads that were hits, over both caches.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.search_cache.hits + self.details_cache.hits;
        let total = hits + self.search_cache.misses + self.details_cache.misses;
        if total == 0 {
            return 0.0;
        }
        (hits as f64 / total as f64) * 100.0
    }
}
