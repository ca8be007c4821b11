//! Error types for the Wud' console.
//!
//! This module defines the crate-wide error type [`ConsoleError`] and its
//! [`Result`] alias, together with the two errors that flow through the list
//! controller itself:
//!
//! - [`ApiError`]: what the Data API collaborator raises (transport failure,
//!   non-2xx status carrying the parsed body, or an undecodable body)
//! - [`LoadError`]: what the loader hands to the renderer, classified by
//!   [`LoadErrorKind`]
//!
//! All errors are implemented using the `thiserror` crate.

use serde_json::Value;
use thiserror::Error;

/// Error raised by the Data API collaborator.
///
/// Mirrors the error object the console branches on: an HTTP `status`, a
/// `message`, and the parsed response body in `data`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport-level failure; no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or a generic status description.
        message: String,
        /// Parsed response body (JSON, or `{"message": <text>}`).
        data: Value,
    },

    /// A 2xx response whose body could not be understood.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Returns `true` for HTTP 401 responses.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Returns the text to show the user.
    ///
    /// Prefers the server-provided `data.message`, then the error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { data, message, .. } => data
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map_or_else(|| message.clone(), str::to_string),
            Self::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            Self::Decode(_) => "The server sent a response that could not be read.".to_string(),
        }
    }
}

/// Classification of a failed list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// No response was received.
    NetworkFailure,
    /// Non-2xx response (other than 401) or an unreadable body.
    ServerError,
    /// HTTP 401; the session should be re-established upstream.
    Unauthorized,
}

/// A failed list load, carrying the original Data API error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind:?}: {source}")]
pub struct LoadError {
    /// What went wrong, by origin.
    pub kind: LoadErrorKind,
    /// The error raised by the Data API.
    pub source: ApiError,
}

impl From<ApiError> for LoadError {
    fn from(source: ApiError) -> Self {
        let kind = match &source {
            ApiError::Network(_) => LoadErrorKind::NetworkFailure,
            ApiError::Status { status: 401, .. } => LoadErrorKind::Unauthorized,
            ApiError::Status { .. } | ApiError::Decode(_) => LoadErrorKind::ServerError,
        };
        Self { kind, source }
    }
}

/// The main error type for console operations.
///
/// Consolidates the error conditions that can escape the library: Data API
/// failures, client-side validation, configuration and I/O problems.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A Data API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A list load failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Required form fields were missing; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The background worker could not be reached.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
