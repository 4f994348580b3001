//! Request Orchestration
//!
//! Runs one price-tag request through validation, feed lookup, the cache
//! and, on a miss, the renderer. Everything here is synchronous; the HTTP
//! layer runs it on a blocking thread.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, CacheStats, ImageCache};
use crate::config::Config;
use crate::error::{Result, TagError};
use crate::feed::FeedSource;
use crate::models::{ImageQuery, RenderRequest};
use crate::render::PriceRenderer;

/// Where the bytes of a successful response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Served {
    Cache,
    Fresh,
}

/// A successful response: PNG bytes ready to send.
#[derive(Debug, Clone)]
pub struct RenderedTag {
    pub bytes: Vec<u8>,
    pub served: Served,
}

/// Price-tag request handler.
///
/// Holds its collaborators behind trait objects so tests can swap in their
/// own feed and renderer.
pub struct TagService {
    config: Config,
    feed: Arc<dyn FeedSource>,
    renderer: Arc<dyn PriceRenderer>,
    cache: ImageCache,
    stats: Mutex<CacheStats>,
}

impl TagService {
    pub fn new(
        config: Config,
        feed: Arc<dyn FeedSource>,
        renderer: Arc<dyn PriceRenderer>,
    ) -> Self {
        let cache = ImageCache::new(config.cache_dir.clone(), config.cache_ttl());
        Self {
            config,
            feed,
            renderer,
            cache,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }

    /// Validates the raw query, then serves it.
    ///
    /// Validation failures return before the feed or the cache is touched.
    pub fn handle(&self, query: &ImageQuery) -> Result<RenderedTag> {
        let request = query.validate(&self.config)?;
        self.serve(&request)
    }

    /// Serves an already validated request.
    pub fn serve(&self, request: &RenderRequest) -> Result<RenderedTag> {
        let product = self
            .feed
            .find_product(&request.product_id)
            .map_err(|e| {
                error!(id = %request.product_id, detail = ?e.detail(), "feed lookup failed");
                e
            })?
            .ok_or(TagError::ProductNotFound)?;

        let key = self.cache_key_for(&product.id, &product.price, request);

        if let Some(bytes) = self.cache.get(&key) {
            debug!(id = %product.id, file = %key.file_name(), "cache hit");
            self.record(CacheStats::record_hit);
            return Ok(RenderedTag {
                bytes,
                served: Served::Cache,
            });
        }
        debug!(id = %product.id, file = %key.file_name(), "cache miss");
        self.record(CacheStats::record_miss);

        let bytes = self
            .renderer
            .render(&product.price, request.width, request.height)
            .map_err(|e| {
                error!(id = %product.id, detail = ?e.detail(), "render failed");
                e
            })?;
        self.record(CacheStats::record_render);

        // Best effort: a failed publish still serves the fresh bytes
        match self.cache.put(&key, &bytes) {
            Ok(path) => info!(id = %product.id, path = %path.display(), "cached price tag"),
            Err(e) => {
                warn!(id = %product.id, error = %e, "cache write failed");
                self.record(CacheStats::record_write_failure);
            }
        }

        Ok(RenderedTag {
            bytes,
            served: Served::Fresh,
        })
    }

    fn cache_key_for(&self, product_id: &str, price: &str, request: &RenderRequest) -> CacheKey {
        let key = CacheKey::new(product_id, price);
        let fallback = (self.config.fallback_width, self.config.fallback_height);
        if (request.width, request.height) == fallback {
            key
        } else {
            key.with_dimensions(request.width, request.height)
        }
    }
}
