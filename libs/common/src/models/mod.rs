//! Loan domain entities exchanged with the backend
//!
//! The backend owns these records; the dashboard only caches read copies.
//! Field names match the backend contract.

pub mod catalog;
pub mod client;
pub mod de;
pub mod id;
pub mod loan;
pub mod payment;

// Re-export for convenience
pub use catalog::{InterestRate, PaymentPeriod};
pub use client::Client;
pub use id::EntityId;
pub use loan::{Loan, LoanStatus, LoanType};
pub use payment::{MonthlyPaymentTotal, Payment};
