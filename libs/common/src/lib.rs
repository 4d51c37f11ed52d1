//! Common library for the Loan Desk application
//!
//! This crate provides shared functionality used across the different
//! services of the Loan Desk dashboard, including configuration loading,
//! error handling, and the loan domain entities exchanged with the backend.
//!
//! ```rust,no_run
//! use common::config::ApiConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     println!("Backend: {} (timeout {}s)", config.base_url, config.timeout_seconds);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
