//! Role-based visibility for the Loan Desk dashboard
//!
//! Maps the signed-in user's role to the (action, resource) pairs the
//! dashboard offers. This is advisory UI gating only: the backend must
//! re-check every request, and nothing here is a security boundary.

pub mod models;
pub mod permissions;
pub mod session;

pub use permissions::{can, permissions_for};
pub use session::Session;
