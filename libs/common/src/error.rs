//! Custom error types for the common library
//!
//! This module defines the configuration error type shared by every service
//! that loads its settings from the environment.

use thiserror::Error;

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reported by the configuration sources
    #[error("Configuration source error: {0}")]
    Source(#[from] ::config::ConfigError),

    /// A setting was present but its value is not acceptable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
