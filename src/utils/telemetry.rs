// file: src/utils/telemetry.rs
// description: timing of food searches for search_time_ms and slow-search warnings
// reference: Production observability best practices

use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Searches slower than this are logged at warn level.
pub const SLOW_SEARCH_THRESHOLD: Duration = Duration::from_secs(3);

/// Wall-clock timer for one search, labelled with the query it serves.
pub struct OperationTimer {
    query: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(query: &str) -> Self {
        debug!("Searching for '{}'", query);
        Self {
            query: query.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Stop timing a search that produced `foods` rows.
    pub fn finish_with_count(self, foods: usize) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "Search for '{}' produced {} foods in {:.3}s",
            self.query,
            foods,
            elapsed.as_secs_f64()
        );
        if Self::is_slow(elapsed, SLOW_SEARCH_THRESHOLD) {
            warn!(
                "Search for '{}' took {:.2}s, over the {:.0}s budget",
                self.query,
                elapsed.as_secs_f64(),
                SLOW_SEARCH_THRESHOLD.as_secs_f64()
            );
        }
        elapsed
    }

    fn is_slow(elapsed: Duration, threshold: Duration) -> bool {
        elapsed > threshold
    }
}
