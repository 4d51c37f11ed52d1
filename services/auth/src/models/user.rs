//! User model and related functionality

use chrono::NaiveDateTime;
use common::models::{EntityId, de};
use serde::{Deserialize, Deserializer, Serialize};

use super::Role;

/// User entity, a staff member or borrower with dashboard access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `None` when the backend reports a role this client does not know
    #[serde(default, deserialize_with = "known_role")]
    pub role: Option<Role>,
    #[serde(
        default,
        deserialize_with = "de::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

/// New user creation payload
///
/// The password is sent as entered; hashing is the backend's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
}

/// User update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

fn known_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|role| role.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_decodes_as_none() {
        let user: User = serde_json::from_str(
            r#"{"id": 5, "name": "Ana", "username": "ana", "role": "superuser"}"#,
        )
        .unwrap();

        assert_eq!(user.role, None);
    }

    #[test]
    fn test_backend_client_role() {
        let user: User = serde_json::from_str(
            r#"{"id": "9", "name": "Luis", "username": "luis@example.com",
                "phone": "3001234567", "role": "CLIENTE",
                "password": "$2a$10$hash", "created_at": "2024-01-05T12:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(user.role, Some(Role::Client));
        assert_eq!(user.phone.as_deref(), Some("3001234567"));
    }
}
