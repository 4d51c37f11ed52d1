//! Data source seam for the dashboard aggregator

use std::future::Future;

use api::{ApiResult, Repositories};
use common::models::{Client, InterestRate, Loan, MonthlyPaymentTotal, Payment, PaymentPeriod};

/// Everything one refresh cycle reads
///
/// Implemented by [`Repositories`] for the live backend. Each method is an
/// independent request; the aggregator decides which ones to run together.
pub trait DashboardSource: Send + Sync {
    fn loans(&self) -> impl Future<Output = ApiResult<Vec<Loan>>> + Send;

    fn clients(&self) -> impl Future<Output = ApiResult<Vec<Client>>> + Send;

    fn payments(&self) -> impl Future<Output = ApiResult<Vec<Payment>>> + Send;

    fn interest_rates(&self) -> impl Future<Output = ApiResult<Vec<InterestRate>>> + Send;

    fn payment_periods(&self) -> impl Future<Output = ApiResult<Vec<PaymentPeriod>>> + Send;

    fn loans_this_week(&self) -> impl Future<Output = ApiResult<Vec<Loan>>> + Send;

    fn loan_count(&self) -> impl Future<Output = ApiResult<u64>> + Send;

    fn loan_total_amount(&self) -> impl Future<Output = ApiResult<f64>> + Send;

    fn monthly_payment_totals(
        &self,
    ) -> impl Future<Output = ApiResult<Vec<MonthlyPaymentTotal>>> + Send;
}

impl DashboardSource for Repositories {
    async fn loans(&self) -> ApiResult<Vec<Loan>> {
        self.loans.get_all().await
    }

    async fn clients(&self) -> ApiResult<Vec<Client>> {
        self.clients.get_all().await
    }

    async fn payments(&self) -> ApiResult<Vec<Payment>> {
        self.payments.get_all().await
    }

    async fn interest_rates(&self) -> ApiResult<Vec<InterestRate>> {
        self.catalog.interest_rates().await
    }

    async fn payment_periods(&self) -> ApiResult<Vec<PaymentPeriod>> {
        self.catalog.payment_periods().await
    }

    async fn loans_this_week(&self) -> ApiResult<Vec<Loan>> {
        self.loans.get_current_week().await
    }

    async fn loan_count(&self) -> ApiResult<u64> {
        self.loans.count().await
    }

    async fn loan_total_amount(&self) -> ApiResult<f64> {
        self.loans.total_amount().await
    }

    async fn monthly_payment_totals(&self) -> ApiResult<Vec<MonthlyPaymentTotal>> {
        self.payments.monthly_totals().await
    }
}
