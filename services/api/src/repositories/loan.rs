//! Loan repository for backend operations

use common::models::{EntityId, Loan};
use tracing::info;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{LoanCount, LoanTotalAmount, NewLoan, UpdateLoan, Validate},
};

/// Loan repository for backend operations
#[derive(Clone, Debug)]
pub struct LoanRepository {
    api: ApiClient,
}

impl LoanRepository {
    /// Create a new loan repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get all loans
    pub async fn get_all(&self) -> ApiResult<Vec<Loan>> {
        self.api.get("/loans").await
    }

    /// Get loans issued during the current week
    pub async fn get_current_week(&self) -> ApiResult<Vec<Loan>> {
        self.api.get("/loans/by-current-week").await
    }

    /// Count every loan on record
    pub async fn count(&self) -> ApiResult<u64> {
        let count: LoanCount = self.api.get("/loans/total").await?;
        Ok(count.total)
    }

    /// Sum of principal across every loan on record
    pub async fn total_amount(&self) -> ApiResult<f64> {
        let total: LoanTotalAmount = self.api.get("/loans/total-amount").await?;
        Ok(total.total_amount)
    }

    /// Find a loan by ID
    pub async fn find_by_id(&self, id: &EntityId) -> ApiResult<Loan> {
        self.api.get(&format!("/loans/{id}")).await
    }

    /// Create a new loan
    pub async fn create(&self, payload: &NewLoan) -> ApiResult<Loan> {
        payload.validate()?;
        let loan: Loan = self.api.post("/loans", payload).await?;
        info!("Created loan: {} for client: {}", loan.id, loan.client_id);
        Ok(loan)
    }

    /// Update an existing loan
    pub async fn update(&self, id: &EntityId, payload: &UpdateLoan) -> ApiResult<Loan> {
        payload.validate()?;
        let loan = self.api.put(&format!("/loans/{id}"), payload).await?;
        info!("Updated loan: {}", id);
        Ok(loan)
    }

    /// Delete a loan
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete(&format!("/loans/{id}")).await?;
        info!("Deleted loan: {}", id);
        Ok(())
    }
}
