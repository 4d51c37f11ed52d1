//! Payment repository for backend operations

use common::models::{EntityId, MonthlyPaymentTotal, Payment};
use tracing::info;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{NewPayment, UpdatePayment, Validate},
};

/// Payment repository for backend operations
#[derive(Clone, Debug)]
pub struct PaymentRepository {
    api: ApiClient,
}

impl PaymentRepository {
    /// Create a new payment repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get all payments
    pub async fn get_all(&self) -> ApiResult<Vec<Payment>> {
        self.api.get("/payments").await
    }

    /// Get the payments registered against one loan
    pub async fn get_by_loan(&self, loan_id: &EntityId) -> ApiResult<Vec<Payment>> {
        self.api.get(&format!("/payments/loan/{loan_id}")).await
    }

    /// Get collected amounts grouped by month
    pub async fn monthly_totals(&self) -> ApiResult<Vec<MonthlyPaymentTotal>> {
        self.api.get("/payments/total").await
    }

    /// Register a new payment
    pub async fn create(&self, payload: &NewPayment) -> ApiResult<Payment> {
        payload.validate()?;
        let payment: Payment = self.api.post("/payments", payload).await?;
        info!(
            "Registered payment: {} for loan: {}",
            payment.id, payment.loan_id
        );
        Ok(payment)
    }

    /// Update an existing payment
    pub async fn update(&self, id: &EntityId, payload: &UpdatePayment) -> ApiResult<Payment> {
        payload.validate()?;
        let payment = self.api.put(&format!("/payments/{id}"), payload).await?;
        info!("Updated payment: {}", id);
        Ok(payment)
    }

    /// Delete a payment
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete(&format!("/payments/{id}")).await?;
        info!("Deleted payment: {}", id);
        Ok(())
    }
}
