//! Loan model and related functionality

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{EntityId, de};

/// How a loan is repaid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Installments cover interest only; principal is repaid at the end
    InterestOnly,
    /// Installments cover principal and interest
    FixedInstallment,
}

impl LoanType {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::InterestOnly => "Interest only",
            LoanType::FixedInstallment => "Principal + interest",
        }
    }
}

/// Loan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Terminated,
}

impl LoanStatus {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Terminated => "Inactive",
        }
    }
}

/// Loan entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: EntityId,
    pub client_id: EntityId,
    pub user_id: EntityId,
    pub loan_type: LoanType,
    #[serde(deserialize_with = "de::number")]
    pub principal_amount: f64,
    #[serde(deserialize_with = "de::date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "de::date")]
    pub end_date: NaiveDate,
    pub interest_rate_id: EntityId,
    pub payment_period_id: EntityId,
    /// Installment amount
    #[serde(deserialize_with = "de::number")]
    pub cuote: f64,
    /// Number of installments, zero for open-ended loans
    #[serde(deserialize_with = "de::count")]
    pub num_cuotes: u64,
    /// Outstanding balance as computed by the backend
    #[serde(deserialize_with = "de::number")]
    pub current_balance: f64,
    pub status: LoanStatus,
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl Loan {
    /// True while the loan is still being repaid
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_from_backend_row() {
        let loan: Loan = serde_json::from_str(
            r#"{
                "id": 12,
                "client_id": "3",
                "user_id": 1,
                "loan_type": "interest_only",
                "principal_amount": "2000000.00",
                "start_date": "2024-02-01T05:00:00.000Z",
                "end_date": "2024-08-01",
                "interest_rate_id": 2,
                "payment_period_id": 4,
                "cuote": 200000,
                "num_cuotes": 0,
                "current_balance": "1800000.00",
                "status": "active",
                "created_at": "2024-02-01 10:15:00"
            }"#,
        )
        .unwrap();

        assert_eq!(loan.id, EntityId::from(12));
        assert_eq!(loan.client_id, EntityId::from(3));
        assert_eq!(loan.principal_amount, 2_000_000.0);
        assert_eq!(loan.current_balance, 1_800_000.0);
        assert_eq!(loan.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(loan.is_active());
        assert!(loan.created_at.is_some());
    }

    #[test]
    fn test_unknown_loan_type_is_rejected() {
        let result = serde_json::from_str::<LoanType>("\"balloon\"");
        assert!(result.is_err());
    }
}
