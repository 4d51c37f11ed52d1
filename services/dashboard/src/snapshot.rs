//! Combined dashboard data from one refresh cycle

use common::models::{
    Client, EntityId, InterestRate, Loan, MonthlyPaymentTotal, Payment, PaymentPeriod,
};
use serde::Serialize;

/// Every collection the dashboard shows, all from the same refresh cycle
///
/// Optional fields are `None` when the matching fetch is not configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub loans: Vec<Loan>,
    pub clients: Vec<Client>,
    pub payments: Vec<Payment>,
    pub interest_rates: Vec<InterestRate>,
    pub payment_periods: Vec<PaymentPeriod>,
    pub loans_this_week: Option<Vec<Loan>>,
    pub loan_count: Option<u64>,
    pub loan_total_amount: Option<f64>,
    pub monthly_payment_totals: Option<Vec<MonthlyPaymentTotal>>,
}

impl DashboardSnapshot {
    pub fn loan(&self, id: &EntityId) -> Option<&Loan> {
        self.loans.iter().find(|loan| &loan.id == id)
    }

    pub fn client(&self, id: &EntityId) -> Option<&Client> {
        self.clients.iter().find(|client| &client.id == id)
    }

    pub fn interest_rate(&self, id: &EntityId) -> Option<&InterestRate> {
        self.interest_rates.iter().find(|rate| &rate.id == id)
    }

    pub fn payment_period(&self, id: &EntityId) -> Option<&PaymentPeriod> {
        self.payment_periods.iter().find(|period| &period.id == id)
    }

    /// Client a payment belongs to, resolved through its loan
    pub fn payment_client(&self, payment: &Payment) -> Option<&Client> {
        self.loan(&payment.loan_id)
            .and_then(|loan| self.client(&loan.client_id))
    }

    /// True if the client still has a loan being repaid
    pub fn has_active_loans(&self, client_id: &EntityId) -> bool {
        self.loans
            .iter()
            .any(|loan| &loan.client_id == client_id && loan.is_active())
    }

    /// Number of loans still being repaid
    pub fn active_loans(&self) -> usize {
        self.loans.iter().filter(|loan| loan.is_active()).count()
    }

    /// Outstanding balance across active loans
    pub fn outstanding_balance(&self) -> f64 {
        self.loans
            .iter()
            .filter(|loan| loan.is_active())
            .map(|loan| loan.current_balance)
            .sum()
    }

    /// Sum of every registered payment
    pub fn payments_collected(&self) -> f64 {
        self.payments.iter().map(|payment| payment.amount).sum()
    }
}
