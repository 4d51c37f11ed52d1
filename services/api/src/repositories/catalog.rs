//! Read-only lookup tables maintained by the backend

use common::models::{InterestRate, PaymentPeriod};

use crate::{client::ApiClient, error::ApiResult};

/// Interest rate and payment period lookups
#[derive(Clone, Debug)]
pub struct CatalogRepository {
    api: ApiClient,
}

impl CatalogRepository {
    /// Create a new catalog repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn interest_rates(&self) -> ApiResult<Vec<InterestRate>> {
        self.api.get("/interest-rates").await
    }

    pub async fn payment_periods(&self) -> ApiResult<Vec<PaymentPeriod>> {
        self.api.get("/payment-periods").await
    }
}
