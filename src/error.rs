//! Error types for the price-tag server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Tag Error Enum ==
/// Terminal failures of a price-tag request.
///
/// The display string of every variant is the fixed message sent to the
/// client. Variants carrying a `String` keep the internal cause for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// No `id` query parameter, or an empty one
    #[error("No product ID provided in the string query")]
    MissingId,

    /// `id` contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid product ID.")]
    InvalidId,

    /// `w` is not an integer in range
    #[error("Invalid width value.")]
    InvalidWidth,

    /// `h` is not an integer in range
    #[error("Invalid height value.")]
    InvalidHeight,

    /// Feed parsed fine but holds no entry with this id
    #[error("Product not found.")]
    ProductNotFound,

    /// Feed could not be read or parsed
    #[error("Product feed unavailable.")]
    FeedUnavailable(String),

    /// Image synthesis failed (empty price, bad font, encoder failure)
    #[error("Failed to render product image.")]
    RenderError(String),
}

impl TagError {
    /// Internal cause, if the variant carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TagError::FeedUnavailable(detail) | TagError::RenderError(detail) => Some(detail),
            _ => None,
        }
    }

    /// HTTP status reported for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            TagError::MissingId
            | TagError::InvalidId
            | TagError::InvalidWidth
            | TagError::InvalidHeight => StatusCode::BAD_REQUEST,
            TagError::ProductNotFound => StatusCode::NOT_FOUND,
            TagError::FeedUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TagError::RenderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        // Plain text, fixed message only
        (self.status(), self.to_string()).into_response()
    }
}

// == Cache Write Error ==
/// Failure to publish a rendered image to the cache directory.
///
/// Never terminal: the caller logs it and still serves the fresh bytes.
#[derive(Error, Debug)]
pub enum CacheWriteError {
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cache entry {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the price-tag server.
pub type Result<T> = std::result::Result<T, TagError>;
