// file: src/cache/history.rs
// description: bounded recency list of past queries and suggestion merging
// reference: most-recent-first history with case-insensitive de-duplication

use crate::repository::LocalNutrientRepository;
use crate::utils::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_SIZE: usize = 50;
pub const DEFAULT_RECENT_COUNT: usize = 8;
pub const MAX_SUGGESTIONS: usize = 6;
const PER_SOURCE_LIMIT: usize = 3;
const MIN_PARTIAL_CHARS: usize = 2;

/// Seed queries offered when history and the local dataset run dry.
pub const POPULAR_QUERIES: &[&str] = &[
    "chicken breast",
    "banana",
    "greek yogurt",
    "oatmeal",
    "salmon",
    "eggs",
    "brown rice",
    "almonds",
    "broccoli",
    "avocado",
    "sweet potato",
    "peanut butter",
    "protein bar",
    "spinach",
    "quinoa",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub result_count: usize,
    pub timestamp: DateTime<Utc>,
}

pub struct SearchHistoryTracker {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
    recent_count: usize,
}

impl SearchHistoryTracker {
    pub fn new(max_entries: usize, recent_count: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
            recent_count,
        }
    }

    /// Move `query` to the front, replacing any earlier entry for it.
    pub fn record(&mut self, query: &str, result_count: usize) {
        let query = Validator::normalize_query(query);
        if query.is_empty() {
            return;
        }

        self.entries.retain(|entry| entry.query != query);
        self.entries.insert(
            0,
            HistoryEntry {
                query,
                result_count,
                timestamp: Utc::now(),
            },
        );
        self.entries.truncate(self.max_entries);
    }

    pub fn recent(&self) -> &[HistoryEntry] {
        let end = self.recent_count.min(self.entries.len());
        &self.entries[..end]
    }

    pub fn recent_queries(&self) -> Vec<String> {
        self.recent().iter().map(|entry| entry.query.clone()).collect()
    }

    /// Suggestions for a partially typed query.
    ///
    /// Below two characters this is just the recent view. Otherwise history
    /// matches come first, then local food names, then popular queries, each
    /// source capped at three and the union capped at six.
    pub fn suggest(&self, partial: &str, repository: &LocalNutrientRepository) -> Vec<String> {
        let needle = Validator::normalize_query(partial);
        if needle.chars().count() < MIN_PARTIAL_CHARS {
            return self.recent_queries();
        }

        let history = self
            .entries
            .iter()
            .filter(|entry| entry.query.contains(&needle))
            .take(PER_SOURCE_LIMIT)
            .map(|entry| entry.query.clone());
        let local = repository.name_suggestions(&needle, PER_SOURCE_LIMIT);
        let popular = POPULAR_QUERIES
            .iter()
            .filter(|query| query.contains(needle.as_str()))
            .take(PER_SOURCE_LIMIT)
            .map(|query| query.to_string());

        let mut suggestions: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
        for candidate in history.chain(local).chain(popular) {
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
            let seen = suggestions
                .iter()
                .any(|existing| existing.to_lowercase() == candidate.to_lowercase());
            if !seen {
                suggestions.push(candidate);
            }
        }
        suggestions
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SearchHistoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE, DEFAULT_RECENT_COUNT)
    }
}
