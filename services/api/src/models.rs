//! Request payloads for create and update operations
//!
//! Every payload is validated before it leaves the client. Update payloads
//! only carry the fields being changed, and only those fields are checked.

use auth::models::{NewUser, UpdateUser};
use chrono::NaiveDate;
use common::models::{EntityId, LoanStatus, LoanType};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    validation::{
        validate_date_range, validate_full_name, validate_non_negative_amount, validate_password,
        validate_password_confirmation, validate_phone, validate_positive_amount,
        validate_reference, validate_username,
    },
};

/// Client-side checks run before a payload is sent
pub trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

fn check(result: Result<(), String>) -> ApiResult<()> {
    result.map_err(ApiError::Validation)
}

/// New client creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

impl Validate for NewClient {
    fn validate(&self) -> ApiResult<()> {
        check(validate_full_name(&self.full_name))?;
        check(validate_phone(&self.phone))
    }
}

/// Client update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Validate for UpdateClient {
    fn validate(&self) -> ApiResult<()> {
        if let Some(full_name) = &self.full_name {
            check(validate_full_name(full_name))?;
        }
        if let Some(phone) = &self.phone {
            check(validate_phone(phone))?;
        }
        Ok(())
    }
}

/// New loan creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    pub client_id: EntityId,
    /// Staff member responsible for collecting the loan
    pub user_id: EntityId,
    pub loan_type: LoanType,
    pub principal_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interest_rate_id: EntityId,
    pub payment_period_id: EntityId,
    pub cuote: f64,
    pub num_cuotes: u64,
    pub current_balance: f64,
    pub status: LoanStatus,
}

impl Validate for NewLoan {
    fn validate(&self) -> ApiResult<()> {
        check(validate_reference("Client", &self.client_id))?;
        check(validate_reference("Collector", &self.user_id))?;
        check(validate_reference("Interest rate", &self.interest_rate_id))?;
        check(validate_reference("Payment period", &self.payment_period_id))?;
        check(validate_positive_amount("Principal amount", self.principal_amount))?;
        check(validate_non_negative_amount("Installment", self.cuote))?;
        check(validate_non_negative_amount("Current balance", self.current_balance))?;
        check(validate_date_range(self.start_date, self.end_date))
    }
}

/// Loan update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLoan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<LoanType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_period_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuote: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_cuotes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanStatus>,
}

impl Validate for UpdateLoan {
    fn validate(&self) -> ApiResult<()> {
        let references = [
            ("Client", &self.client_id),
            ("Collector", &self.user_id),
            ("Interest rate", &self.interest_rate_id),
            ("Payment period", &self.payment_period_id),
        ];
        for (field, id) in references {
            if let Some(id) = id {
                check(validate_reference(field, id))?;
            }
        }

        if let Some(principal) = self.principal_amount {
            check(validate_positive_amount("Principal amount", principal))?;
        }
        if let Some(cuote) = self.cuote {
            check(validate_non_negative_amount("Installment", cuote))?;
        }
        if let Some(balance) = self.current_balance {
            check(validate_non_negative_amount("Current balance", balance))?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            check(validate_date_range(start, end))?;
        }
        Ok(())
    }
}

/// New payment registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub loan_id: EntityId,
    pub amount: f64,
    pub interest_pay: f64,
    pub capital_pay: f64,
    pub remaining: f64,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Validate for NewPayment {
    fn validate(&self) -> ApiResult<()> {
        check(validate_reference("Loan", &self.loan_id))?;
        check(validate_positive_amount("Amount", self.amount))?;
        check(validate_non_negative_amount("Interest paid", self.interest_pay))?;
        check(validate_non_negative_amount("Capital paid", self.capital_pay))?;
        check(validate_non_negative_amount("Remaining", self.remaining))
    }
}

/// Payment update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePayment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for UpdatePayment {
    fn validate(&self) -> ApiResult<()> {
        if let Some(loan_id) = &self.loan_id {
            check(validate_reference("Loan", loan_id))?;
        }
        if let Some(amount) = self.amount {
            check(validate_positive_amount("Amount", amount))?;
        }
        let splits = [
            ("Interest paid", self.interest_pay),
            ("Capital paid", self.capital_pay),
            ("Remaining", self.remaining),
        ];
        for (field, value) in splits {
            if let Some(value) = value {
                check(validate_non_negative_amount(field, value))?;
            }
        }
        Ok(())
    }
}

impl Validate for NewUser {
    fn validate(&self) -> ApiResult<()> {
        check(validate_full_name(&self.name))?;
        check(validate_username(&self.username))?;
        check(validate_password(&self.password))?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            check(validate_phone(phone))?;
        }
        Ok(())
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> ApiResult<()> {
        if let Some(name) = &self.name {
            check(validate_full_name(name))?;
        }
        if let Some(username) = &self.username {
            check(validate_username(username))?;
        }
        if let Some(password) = &self.password {
            check(validate_password(password))?;
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            check(validate_phone(phone))?;
        }
        Ok(())
    }
}

/// Registration form: a new user plus the repeated password
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: NewUser,
    pub password_confirmation: String,
}

impl Validate for Registration {
    fn validate(&self) -> ApiResult<()> {
        self.user.validate()?;
        check(validate_password_confirmation(
            &self.user.password,
            &self.password_confirmation,
        ))
    }
}

/// `GET /loans/total` response
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LoanCount {
    #[serde(deserialize_with = "common::models::de::count")]
    pub total: u64,
}

/// `GET /loans/total-amount` response
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LoanTotalAmount {
    #[serde(deserialize_with = "common::models::de::number")]
    pub total_amount: f64,
}
