//! Role model and related functionality

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Coarse identity classification assigned at sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "collector")]
    Collector,
    /// Borrower account; the backend spells this role `CLIENTE`
    #[serde(rename = "CLIENTE", alias = "client")]
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Collector, Role::Client];

    /// Get the role as it is stored by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Collector => "collector",
            Role::Client => "CLIENTE",
        }
    }
}

/// Verb of a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Noun of a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Loan,
    Client,
    Payment,
    Debt,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Loan,
        Resource::Client,
        Resource::Payment,
        Resource::Debt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Loan => "loan",
            Resource::Client => "client",
            Resource::Payment => "payment",
            Resource::Debt => "debt",
        }
    }
}

/// A single allowed or denied (action, resource) assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
    pub allowed: bool,
}

impl Permission {
    /// Grant `action` on `resource`
    pub const fn allow(action: Action, resource: Resource) -> Self {
        Self {
            action,
            resource,
            allowed: true,
        }
    }

    /// True when this entry grants exactly `action` on `resource`
    pub fn grants(&self, action: Action, resource: Resource) -> bool {
        self.allowed && self.action == action && self.resource == resource
    }
}

/// Error returned when parsing an unknown role, action or resource name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRoleError {
    #[error("Unknown role: {0}")]
    Role(String),

    #[error("Unknown action: {0}")]
    Action(String),

    #[error("Unknown resource: {0}")]
    Resource(String),
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "collector" => Ok(Role::Collector),
            "client" | "cliente" => Ok(Role::Client),
            _ => Err(ParseRoleError::Role(s.to_string())),
        }
    }
}

impl FromStr for Action {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParseRoleError::Action(s.to_string()))
    }
}

impl FromStr for Resource {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| ParseRoleError::Resource(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
