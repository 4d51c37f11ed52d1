//! Client model

use serde::{Deserialize, Serialize};

use super::{EntityId, de};

/// Client entity, a borrower
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    pub full_name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub address: String,
}
