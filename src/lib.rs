//! Price Tag - product price-tag images over HTTP
//!
//! Looks products up in an Atom feed, renders their price onto a transparent
//! PNG and keeps the result in an on-disk cache keyed by product and price.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod render;
pub mod service;
pub mod tasks;
pub mod validate;

pub use api::AppState;
pub use config::Config;
pub use service::TagService;
pub use tasks::spawn_cleanup_task;
