//! Error types for MovieDeck.
//!
//! This module defines the centralized error type [`MovieDeckError`] and a type alias
//! [`Result`] used throughout the crate. Display strings double as the user-visible
//! messages committed into store error fields, so gateway and validation variants
//! render their message verbatim.

use thiserror::Error;

/// The main error type for MovieDeck operations.
///
/// Fetch-originated variants (`Validation`, `Gateway`, `Timeout`) are caught at the
/// orchestrator boundary and turned into store error fields. `Persistence` failures
/// are logged and swallowed by the persistence bridge.
///
/// # Examples
///
/// ```
/// use moviedeck::domain::MovieDeckError;
///
/// let err = MovieDeckError::Gateway { status: Some(404), message: "Not found".into() };
/// assert_eq!(err.to_string(), "Not found");
/// assert_eq!(MovieDeckError::Timeout.to_string(), "TMDB request timed out.");
/// ```
#[derive(Debug, Error)]
pub enum MovieDeckError {
    /// Malformed input (movie id, query) rejected before reaching the network.
    #[error("{0}")]
    Validation(String),

    /// Non-success response or transport failure from the remote API.
    ///
    /// `status` is the HTTP status when a response was received at all.
    #[error("{message}")]
    Gateway {
        /// HTTP status code, if any.
        status: Option<u16>,
        /// Best available human-readable message.
        message: String,
    },

    /// The remote API did not answer within the configured timeout.
    #[error("TMDB request timed out.")]
    Timeout,

    /// Key-value persistence read or write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MovieDeckError {
    /// Builds a gateway error for a non-success status without a usable body.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::Gateway {
            status: Some(status),
            message: format!("TMDB request failed with status {status}"),
        }
    }

    /// Returns `true` for the timeout case of gateway failures.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// A specialized `Result` type for MovieDeck operations.
pub type Result<T> = std::result::Result<T, MovieDeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_display_their_message_only() {
        let err = MovieDeckError::status(503);
        assert_eq!(err.to_string(), "TMDB request failed with status 503");
        assert!(!err.is_timeout());
    }

    #[test]
    fn timeout_is_distinguished_by_message() {
        let err = MovieDeckError::Timeout;
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "TMDB request timed out.");
    }
}
