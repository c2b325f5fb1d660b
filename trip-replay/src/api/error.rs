//! Backend API error types.

use super::convert::ConversionError;

/// Errors from the backend HTTP client and route sources.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error status or error payload
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No route with this id
    #[error("route not found: {0}")]
    NotFound(String),

    /// Response parsed but violated a domain invariant
    #[error("invalid response: {0}")]
    Conversion(#[from] ConversionError),

    /// Client could not be configured
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Whether the backend reported a server-side failure (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status >= 500)
    }
}
