//! API error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the artwork catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Catalog server error.
    #[error("Catalog server error: {0}")]
    ServerError(String),

    /// Any other non-success status.
    #[error("Request rejected: {0}")]
    BadRequest(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid page number requested.
    #[error("Invalid page number: {0} (pages start at 1)")]
    InvalidPage(u64),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::BadRequest(format!("HTTP {}: {}", status, context)),
        }
    }
}
