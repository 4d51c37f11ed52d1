//! Payment model and related functionality

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{EntityId, de};

/// Payment entity
///
/// The split between interest and capital and the remaining balance are
/// computed by the backend when the payment is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: EntityId,
    pub loan_id: EntityId,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(deserialize_with = "de::number")]
    pub interest_pay: f64,
    #[serde(deserialize_with = "de::number")]
    pub capital_pay: f64,
    #[serde(deserialize_with = "de::number")]
    pub remaining: f64,
    #[serde(deserialize_with = "de::date")]
    pub payment_date: NaiveDate,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub notes: String,
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

/// Total collected in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentTotal {
    /// Month label as reported by the backend, e.g. `2024-03`
    pub month: String,
    #[serde(deserialize_with = "de::number")]
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_total_with_string_amount() {
        let totals: Vec<MonthlyPaymentTotal> = serde_json::from_str(
            r#"[{"month": "2024-01", "total_amount": "350000.00"},
                {"month": "2024-02", "total_amount": 125000}]"#,
        )
        .unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total_amount, 350_000.0);
        assert_eq!(totals[1].total_amount, 125_000.0);
    }
}
