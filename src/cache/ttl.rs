// file: src/cache/ttl.rs
// description: bounded in-memory key/value cache with lazy TTL expiry
// reference: insertion-ordered eviction with an opt-in access-ordered mode

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Which entry gives way when a full cache receives a new key.
///
/// `InsertionOrder` evicts the earliest inserted key even if it was read a
/// moment ago (FIFO). `AccessOrder` moves an entry to the back on every hit,
/// which makes the cache a true LRU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    #[default]
    InsertionOrder,
    AccessOrder,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub data: V,
    pub timestamp: Instant,
    sequence: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

pub struct CacheLayer<V> {
    entries: HashMap<String, CacheEntry<V>>,
    // sequence -> key, oldest first
    order: BTreeMap<u64, String>,
    next_sequence: u64,
    ttl: Duration,
    capacity: usize,
    policy: EvictionPolicy,
    stats: CacheStats,
}

impl<V: Clone> CacheLayer<V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_sequence: 0,
            ttl,
            capacity,
            policy: EvictionPolicy::default(),
            stats: CacheStats {
                capacity,
                ..CacheStats::default()
            },
        }
    }

    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stored value if it is younger than the TTL. Stale entries are removed
    /// on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.timestamp) >= self.ttl,
            None => {
                self.stats.misses += 1;
                return None;
            }
        };

        if expired {
            self.remove(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            debug!("Cache entry expired: {}", key);
            return None;
        }

        if self.policy == EvictionPolicy::AccessOrder {
            self.touch(key);
        }

        self.stats.hits += 1;
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    /// Insert or overwrite. A new key arriving at capacity first evicts
    /// exactly one entry, the oldest in eviction order. Overwriting an
    /// existing key refreshes its timestamp but keeps its insertion position.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.data = value;
            entry.timestamp = now;
            if self.policy == EvictionPolicy::AccessOrder {
                self.touch(&key);
            }
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let sequence = self.next_sequence();
        self.order.insert(sequence, key.clone());
        self.entries.insert(
            key.clone(),
            CacheEntry {
                key,
                data: value,
                timestamp: now,
                sequence,
            },
        );
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.sequence);
        Some(entry.data)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Physically held entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }

    fn evict_oldest(&mut self) {
        if let Some((_, key)) = self.order.pop_first() {
            self.entries.remove(&key);
            self.stats.evictions += 1;
            debug!("Cache full ({}), evicted {}", self.capacity, key);
        }
    }

    fn touch(&mut self, key: &str) {
        let sequence = self.next_sequence();
        if let Some(entry) = self.entries.get_mut(key) {
            self.order.remove(&entry.sequence);
            entry.sequence = sequence;
            self.order.insert(sequence, key.to_string());
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

impl<V: Clone> Default for CacheLayer<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }
}
