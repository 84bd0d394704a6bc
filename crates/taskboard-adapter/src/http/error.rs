/*
[INPUT]:  Error sources (HTTP, API, serialization, URL, date formats)
[OUTPUT]: Structured error types with user-facing messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::DateError;

/// Main error type for the Task API adapter
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Date field was not in the expected format
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskboardError {
    /// Check if error indicates a rejected or missing bearer token
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TaskboardError::Api { code: 401, .. })
    }

    /// Check if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskboardError::Api { code: 404, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TaskboardError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// API errors surface the server's own text; everything else falls back
    /// to the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            TaskboardError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for Task API operations
pub type Result<T> = std::result::Result<T, TaskboardError>;
