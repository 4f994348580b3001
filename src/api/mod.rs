//! API Module
//!
//! HTTP handlers and routing for the price-tag server.
//!
//! # Endpoints
//! - `GET /` and `GET /image` - Render or serve a cached price tag
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
