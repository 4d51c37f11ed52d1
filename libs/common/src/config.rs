//! Configuration loading for the Loan Desk services
//!
//! Settings are read from environment variables prefixed with `LOAN_DESK_`
//! on top of built-in defaults, using the `config` crate.

use ::config::{Config, Environment, Value};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Prefix shared by every Loan Desk environment variable
pub const ENV_PREFIX: &str = "LOAN_DESK";

/// Build the settings tree from the given defaults and the process environment
///
/// Keys are lowercase without the prefix, so `LOAN_DESK_API_URL` is read as
/// `api_url`.
pub fn load_settings(defaults: &[(&str, Value)]) -> ConfigResult<Config> {
    let mut builder = Config::builder();
    for (key, value) in defaults {
        builder = builder.set_default(*key, value.clone())?;
    }

    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    debug!("Loaded settings with {} defaults", defaults.len());
    Ok(settings)
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every request path is appended to, without a trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LOAN_DESK_API_URL`: Backend base URL (default: "http://localhost:3000")
    /// - `LOAN_DESK_API_TIMEOUT_SECONDS`: Request timeout in seconds (default: 30)
    pub fn from_env() -> ConfigResult<Self> {
        let settings = load_settings(&[
            ("api_url", Value::from("http://localhost:3000")),
            ("api_timeout_seconds", Value::from(30_i64)),
        ])?;

        let base_url = settings.get_string("api_url")?;
        let timeout_seconds = settings.get::<u64>("api_timeout_seconds")?;

        Self::new(base_url, timeout_seconds)
    }

    /// Create a validated ApiConfig
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> ConfigResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "API timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout_seconds,
        })
    }
}
