//! Request and Response models for the price-tag API
//!
//! This module defines the query DTO of the image endpoint, the validated
//! render request built from it, and the JSON bodies of the service endpoints.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ImageQuery, RenderRequest};
pub use responses::{HealthResponse, StatsResponse};
