//! Domain error types for txdash
//!
//! Provides structured error types for different domains:
//! - `FetchError` for the cache-aware fetch layer
//! - `TxdashError` as the top-level error type

use thiserror::Error;

/// Top-level error type for txdash
#[derive(Debug, Error)]
pub enum TxdashError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Other(String),
}

/// Errors related to the fetch capability
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    #[error("Invalid request params: {0}")]
    InvalidParams(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}

/// Result type alias for TxdashError
pub type Result<T> = std::result::Result<T, TxdashError>;

/// Result type alias for FetchError
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Conversion from anyhow::Error for backward compatibility
impl From<anyhow::Error> for TxdashError {
    fn from(err: anyhow::Error) -> Self {
        TxdashError::Other(err.to_string())
    }
}

impl From<String> for TxdashError {
    fn from(msg: String) -> Self {
        TxdashError::Other(msg)
    }
}

impl From<&str> for TxdashError {
    fn from(msg: &str) -> Self {
        TxdashError::Other(msg.to_string())
    }
}
