//! Error types for the Sbanken client library.

use thiserror::Error;

use crate::config::ConfigError;

/// The main error type for all Sbanken client operations.
#[derive(Error, Debug)]
pub enum SbankenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The API flagged the response as an error (`isError: true`).
    #[error("{0}")]
    Api(ApiError),

    /// The identity server rejected the client or returned an unusable token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The request could not be built (e.g. a base URL that cannot take path segments)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing a streamed response body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SbankenError {
    /// Returns the business-level API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SbankenError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Business-level error carried in the response envelope.
///
/// Displays as the bare `errorMessage` so callers can surface it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The `errorMessage` field of the envelope
    pub message: String,
    /// The `errorType` field, when present
    pub error_type: Option<String>,
    /// The numeric `errorCode` field, when present
    pub code: Option<i64>,
    /// The `traceId` field, useful when contacting support
    pub trace_id: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Create a new API error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
            trace_id: None,
        }
    }

    /// Check if the API rejected the request for lack of funds.
    pub fn is_insufficient_funds(&self) -> bool {
        self.message.to_ascii_lowercase().contains("insufficient funds")
    }

    /// Check if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.code == Some(404) || self.message.to_ascii_lowercase().contains("not found")
    }
}
