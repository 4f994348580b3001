//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// == Fixed Limits ==
/// Largest accepted canvas width in pixels
pub const MAX_WIDTH: u32 = 2000;
/// Largest accepted canvas height in pixels
pub const MAX_HEIGHT: u32 = 1000;
/// Width used when the request carries no `w` parameter
pub const FALLBACK_WIDTH: u32 = 1000;
/// Height used when the request carries no `h` parameter
pub const FALLBACK_HEIGHT: u32 = 1415;
/// Seconds a rendered image stays valid on disk (7 days)
pub const CACHE_EXPIRATION_TIME: u64 = 7 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// Built once at startup and handed to the service; nothing reads ambient
/// globals after that, so tests can point the service at their own feed,
/// font and cache directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Atom product feed
    pub feed_path: PathBuf,
    /// Path to the TrueType font used for the price label
    pub font_path: PathBuf,
    /// Directory holding cached PNG files
    pub cache_dir: PathBuf,
    /// Freshness window of a cached image in seconds
    pub cache_expiration: u64,
    pub max_width: u32,
    pub max_height: u32,
    pub fallback_width: u32,
    pub fallback_height: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Parse the feed once at startup instead of on every request
    pub preload_feed: bool,
    /// Interval in seconds of the expired-file sweep, 0 disables it
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FEED_PATH` - Product feed location (default: product_feed.xml)
    /// - `FONT_PATH` - Font file (default: fonts/Kanit.ttf)
    /// - `CACHE_DIRECTORY` - Cache directory (default: cache)
    /// - `CACHE_EXPIRATION_TIME` - Freshness window in seconds (default: 604800)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PRELOAD_FEED` - `true`/`1` to index the feed once at startup (default: false)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            feed_path: env::var("FEED_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.feed_path),
            font_path: env::var("FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_path),
            cache_dir: env::var("CACHE_DIRECTORY")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cache_expiration: env::var("CACHE_EXPIRATION_TIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_expiration),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            preload_feed: env::var("PRELOAD_FEED")
                .ok()
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(defaults.preload_feed),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            ..defaults
        }
    }

    /// Freshness window as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_expiration)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from("product_feed.xml"),
            font_path: PathBuf::from("fonts/Kanit.ttf"),
            cache_dir: PathBuf::from("cache"),
            cache_expiration: CACHE_EXPIRATION_TIME,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
            server_port: 3000,
            preload_feed: false,
            cleanup_interval: 0,
        }
    }
}
