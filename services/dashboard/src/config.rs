//! Dashboard configuration

use ::config::{ConfigError as SourceError, Value};
use common::{
    config::{ApiConfig, load_settings},
    error::ConfigResult,
};

/// Optional fetches included in every refresh cycle
///
/// The five core collections are always fetched; these add the summary
/// endpoints some deployments expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionalFetches {
    pub loans_this_week: bool,
    pub loan_count: bool,
    pub loan_total_amount: bool,
    pub monthly_payment_totals: bool,
}

impl OptionalFetches {
    /// Every optional fetch enabled
    pub const ALL: Self = Self {
        loans_this_week: true,
        loan_count: true,
        loan_total_amount: true,
        monthly_payment_totals: true,
    };
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub fetches: OptionalFetches,
    /// User to sign in as, if configured
    pub username: Option<String>,
}

impl DashboardConfig {
    /// Create a new DashboardConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LOAN_DESK_API_URL`, `LOAN_DESK_API_TIMEOUT_SECONDS`: see [`ApiConfig::from_env`]
    /// - `LOAN_DESK_FETCH_LOANS_THIS_WEEK`: Fetch loans issued this week (default: false)
    /// - `LOAN_DESK_FETCH_LOAN_COUNT`: Fetch the total loan count (default: false)
    /// - `LOAN_DESK_FETCH_LOAN_TOTAL_AMOUNT`: Fetch the total principal (default: false)
    /// - `LOAN_DESK_FETCH_MONTHLY_PAYMENT_TOTALS`: Fetch per-month payment totals (default: false)
    /// - `LOAN_DESK_USERNAME`: User to sign in as (optional)
    pub fn from_env() -> ConfigResult<Self> {
        let api = ApiConfig::from_env()?;

        let settings = load_settings(&[
            ("fetch_loans_this_week", Value::from(false)),
            ("fetch_loan_count", Value::from(false)),
            ("fetch_loan_total_amount", Value::from(false)),
            ("fetch_monthly_payment_totals", Value::from(false)),
        ])?;

        let fetches = OptionalFetches {
            loans_this_week: settings.get_bool("fetch_loans_this_week")?,
            loan_count: settings.get_bool("fetch_loan_count")?,
            loan_total_amount: settings.get_bool("fetch_loan_total_amount")?,
            monthly_payment_totals: settings.get_bool("fetch_monthly_payment_totals")?,
        };

        let username = match settings.get_string("username") {
            Ok(username) => Some(username.trim().to_string()).filter(|u| !u.is_empty()),
            Err(SourceError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            api,
            fetches,
            username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "LOAN_DESK_FETCH_LOANS_THIS_WEEK",
        "LOAN_DESK_FETCH_LOAN_COUNT",
        "LOAN_DESK_FETCH_LOAN_TOTAL_AMOUNT",
        "LOAN_DESK_FETCH_MONTHLY_PAYMENT_TOTALS",
        "LOAN_DESK_USERNAME",
    ];

    fn clear() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_dashboard_config_defaults() {
        clear();

        let config = DashboardConfig::from_env().unwrap();
        assert_eq!(config.fetches, OptionalFetches::default());
        assert_eq!(config.username, None);
    }

    #[test]
    #[serial]
    fn test_dashboard_config_with_optional_fetches() {
        clear();
        unsafe {
            std::env::set_var("LOAN_DESK_FETCH_LOAN_COUNT", "true");
            std::env::set_var("LOAN_DESK_FETCH_MONTHLY_PAYMENT_TOTALS", "true");
            std::env::set_var("LOAN_DESK_USERNAME", " admin ");
        }

        let config = DashboardConfig::from_env().unwrap();
        assert!(config.fetches.loan_count);
        assert!(config.fetches.monthly_payment_totals);
        assert!(!config.fetches.loans_this_week);
        assert_eq!(config.username.as_deref(), Some("admin"));

        clear();
    }

    #[test]
    #[serial]
    fn test_dashboard_config_rejects_bad_flag() {
        clear();
        unsafe {
            std::env::set_var("LOAN_DESK_FETCH_LOAN_COUNT", "sometimes");
        }

        assert!(DashboardConfig::from_env().is_err());

        clear();
    }
}
