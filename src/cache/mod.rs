//! Cache Module
//!
//! Filesystem cache of rendered price tags: one PNG per key, file
//! modification time as the freshness source of truth.

mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use key::{cache_key, CacheKey};
pub use stats::CacheStats;
pub use store::{is_fresh, ImageCache};

// == Public Constants ==
/// Extension of every published cache entry
pub const CACHE_FILE_EXTENSION: &str = "png";
