//! REST client for the Loan Desk backend
//!
//! [`ApiClient`] speaks JSON over HTTP to a single configured base URL, and
//! [`Repositories`] groups one typed repository per backend resource.

pub mod client;
pub mod error;
pub mod models;
pub mod repositories;
pub mod validation;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use repositories::Repositories;
pub use reqwest::StatusCode;
