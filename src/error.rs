//! Error types for the site audit pipeline.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for audit operations
//! - `Result<T>`: Type alias for Results using AppError
//!
//! Fatal errors (`InvalidUrl`, `UnsupportedContent`) abort the analysis with
//! no partial report. `Fetch` degrades the report instead of aborting, and a
//! PageSpeed failure never surfaces here at all - it is carried inside the
//! report as a soft failure.

use thiserror::Error;

/// Domain-specific errors for audit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid, empty or disallowed target URL
    #[error("{0}")]
    InvalidUrl(String),

    /// The target responded with something that is not an HTML document
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// Network request for the page markup failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Analysis was cancelled by the caller
    #[error("Analysis cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an invalid-URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// True for errors that should reach the caller as a 4xx-equivalent
    /// (bad request) rather than an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UnsupportedContent(_))
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message_is_verbatim() {
        let err = AppError::invalid_url("host not allowed");
        assert_eq!(err.to_string(), "host not allowed");
        assert!(err.is_client_error());
    }

    #[test]
    fn fetch_error_is_not_a_client_error() {
        assert!(!AppError::fetch("dns failure").is_client_error());
        assert!(!AppError::Cancelled.is_client_error());
    }
}
