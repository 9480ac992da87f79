//! Error types for the numtally-core library.

use thiserror::Error;

/// Main error type for the numtally library.
#[derive(Error, Debug)]
pub enum NumtallyError {
    /// Fetching the source text failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while retrieving source text.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The address could not be parsed or uses an unsupported scheme.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Connection, TLS or body transfer failed.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The request did not complete within the timeout.
    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: f64 },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for url {url}")]
    Status { url: String, status: u16 },

    /// Reading a local source failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the numtally library.
pub type Result<T> = std::result::Result<T, NumtallyError>;
