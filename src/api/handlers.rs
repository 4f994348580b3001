//! API Handlers
//!
//! HTTP request handlers for each price-tag server endpoint.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::{Result, TagError};
use crate::feed::{FeedSource, FileFeed, ProductFeed};
use crate::models::{HealthResponse, ImageQuery, StatsResponse};
use crate::render::TtfRenderer;
use crate::service::{Served, TagService};

/// Content type of every successful image response
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator, shared with blocking worker threads
    pub service: Arc<TagService>,
}

impl AppState {
    /// Creates a new AppState around an assembled service.
    pub fn new(service: TagService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Loads the font, and the feed too when `preload_feed` is set, so a
    /// broken deployment fails at startup instead of on the first request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let feed: Arc<dyn FeedSource> = if config.preload_feed {
            let feed = ProductFeed::load(&config.feed_path)?;
            info!(products = feed.len(), path = %config.feed_path.display(), "feed indexed");
            Arc::new(feed)
        } else {
            Arc::new(FileFeed::new(config.feed_path.clone()))
        };
        let renderer = Arc::new(TtfRenderer::from_file(&config.font_path)?);

        Ok(Self::new(TagService::new(config.clone(), feed, renderer)))
    }
}

/// Handler for GET /image (also mounted at /)
///
/// Responds with PNG bytes, or a plain-text error message. The query string
/// is decoded leniently so every failure maps to one of the fixed messages.
pub async fn image_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response> {
    let query = ImageQuery::from_query_string(raw.as_deref().unwrap_or_default());
    let service = state.service.clone();
    let tag = tokio::task::spawn_blocking(move || service.handle(&query))
        .await
        .map_err(|e| TagError::RenderError(format!("render task failed: {e}")))??;

    let cache_status = match tag.served {
        Served::Cache => "HIT",
        Served::Fresh => "MISS",
    };

    Ok((
        [
            (header::CONTENT_TYPE, PNG_CONTENT_TYPE),
            (header::HeaderName::from_static("x-cache"), cache_status),
        ],
        tag.bytes,
    )
        .into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
