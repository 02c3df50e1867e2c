//! Error types for Autotask API operations.

use thiserror::Error;

/// Errors that can occur during Autotask API operations.
#[derive(Debug, Error)]
pub enum AutotaskError {
    /// Configuration is missing or incomplete.
    #[error("Autotask configuration required: {0}")]
    ConfigMissing(String),

    /// The vendor answered `{"item": null}` for a single read.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: i64,
    },

    /// API request failed with a non-success status.
    #[error("Autotask API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Body was not valid JSON or did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A list response lacked the `items` envelope key.
    #[error("Missing items key in {entity_type} response")]
    MissingItemsKey { entity_type: &'static str },

    /// A response lacked some other required envelope key.
    #[error("Missing '{key}' key in {context} response")]
    MissingKey {
        key: &'static str,
        context: &'static str,
    },

    /// A nested write or delete path needs a parent ID the caller did not supply.
    #[error("{entity_type} requires a parent ID to build its request path")]
    MissingParentId { entity_type: &'static str },

    /// Query builder state cannot be sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The entity does not support the requested operation.
    #[error("{entity_type} does not support {operation}")]
    Unsupported {
        entity_type: &'static str,
        operation: &'static str,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl AutotaskError {
    /// Whether the error came from the transport rather than from decoding
    /// or request construction.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. }
                | Self::HttpError(_)
                | Self::RateLimited { .. }
                | Self::UrlError(_)
        )
    }

    /// HTTP status code reported by the API, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Autotask operations.
pub type Result<T> = core::result::Result<T, AutotaskError>;
