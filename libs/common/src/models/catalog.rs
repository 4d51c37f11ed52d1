//! Reference data used when creating loans

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{EntityId, de};

/// Interest rate offered for new loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    pub id: EntityId,
    #[serde(deserialize_with = "de::number")]
    pub percentage: f64,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub description: String,
    #[serde(deserialize_with = "de::flag")]
    pub is_active: bool,
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

/// Installment frequency, e.g. weekly or monthly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub id: EntityId,
    pub name: String,
    #[serde(deserialize_with = "de::count")]
    pub days: u64,
    #[serde(deserialize_with = "de::flag")]
    pub is_active: bool,
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}
