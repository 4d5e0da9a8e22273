//! Error types for PRTG API operations.
//!
//! This module provides the error taxonomy for talking to a PRTG instance,
//! covering transport failures, HTTP status mapping, and the object lookup
//! errors the table endpoints can produce.

use thiserror::Error;

/// Main error type for PRTG operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Authentication failed (HTTP 401)
    #[error("Authentication failed for PRTG API: {0}")]
    Unauthorized(String),

    /// A single object was expected but none matched the query
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A single object was expected but several matched the query
    #[error("Duplicate object: {0}")]
    DuplicateObject(String),

    /// The server rejected the request (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested content does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// PRTG instance is unreachable or returned a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Operation timed out
    #[error("Timeout waiting for PRTG: {0}")]
    Timeout(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Invalid request parameters, rejected before any HTTP call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to decode a PRTG response body
    #[error("Failed to parse PRTG response: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint or base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for PRTG operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ObjectNotFound(_) => "OBJECT_NOT_FOUND",
            Self::DuplicateObject(_) => "DUPLICATE_OBJECT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::ServiceUnavailable(_) | Self::ParseError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
