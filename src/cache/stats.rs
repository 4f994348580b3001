//! Cache Statistics Module
//!
//! Tracks how requests were served: from disk, or through a fresh render.

use serde::Serialize;

// == Cache Stats ==
/// Counters of the image cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests answered from a fresh cache file
    pub hits: u64,
    /// Requests that found no fresh cache file (missing or expired)
    pub misses: u64,
    /// Images synthesized successfully
    pub renders: u64,
    /// Rendered images that could not be published to the cache directory
    pub write_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_render(&mut self) {
        self.renders += 1;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }
}
