//! Error types for Toolverse.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to an external service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The external service answered with a non-success status or error payload.
    #[error("Service error: {0}")]
    Service(String),

    /// The service answered but the body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A generation for the same feature is already in flight.
    #[error("Busy: {0}")]
    Busy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the user can recover by re-triggering the action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Service(_) | Error::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
