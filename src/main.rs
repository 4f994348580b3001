//! Price Tag - product price-tag images over HTTP
//!
//! Looks products up in an Atom feed, renders their price onto a transparent
//! PNG and keeps the result in an on-disk cache keyed by product and price.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use price_tag::api::create_router;
use price_tag::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the price-tag server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the font (and the feed, when preloading) into the service
/// 4. Start the background cache sweep if enabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "price_tag=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting price-tag server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: feed={}, font={}, cache_dir={}, expiration={}s, port={}",
        config.feed_path.display(),
        config.font_path.display(),
        config.cache_dir.display(),
        config.cache_expiration,
        config.server_port
    );

    let state = AppState::from_config(&config).map_err(|e| {
        anyhow::anyhow!("{e} ({})", e.detail().unwrap_or("no detail"))
    })?;
    info!("Price-tag service initialized");

    let cleanup_handle = (config.cleanup_interval > 0).then(|| {
        info!("Background cache sweep started");
        spawn_cleanup_task(state.service.cache().clone(), config.cleanup_interval)
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cache sweep task aborted");
    }
}
