//! Loan Desk dashboard
//!
//! The [`DashboardAggregator`] loads every collection the dashboard shows in
//! one concurrent batch and publishes a consistent [`DashboardSnapshot`].
//! [`DashboardView`] combines that with the signed-in user's permissions to
//! decide what is shown.

pub mod config;
pub mod formatters;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod views;

pub use config::{DashboardConfig, OptionalFetches};
pub use snapshot::DashboardSnapshot;
pub use source::DashboardSource;
pub use store::{DashboardAggregator, DashboardWatcher, FetchPhase, FetchState, RefreshOutcome};
pub use views::DashboardView;
