//! Custom error types for the API client

use reqwest::StatusCode;
use thiserror::Error;

/// Custom error type for calls against the loan backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Request to {path} failed with status {status}")]
    Status { path: String, status: StatusCode },

    /// The response body did not match the expected shape
    #[error("Malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload was rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] common::error::ConfigError),
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
