//! User DTOs for the search API.

use std::collections::HashMap;

use kc_model::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User representation returned by search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    /// Unique identifier.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Whether the user is enabled.
    pub enabled: bool,
    /// User's email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// User's first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// User's last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// When the user was created (milliseconds since epoch).
    pub created_timestamp: i64,
    /// Custom user attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,
}

impl From<User> for UserRepresentation {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            enabled: user.enabled,
            email: user.email,
            email_verified: user.email_verified,
            first_name: user.first_name,
            last_name: user.last_name,
            created_timestamp: user.created_at.timestamp_millis(),
            attributes: user.attributes,
        }
    }
}

/// Converts users to representations, keeping their order.
pub fn to_representations(users: Vec<User>) -> Vec<UserRepresentation> {
    users.into_iter().map(UserRepresentation::from).collect()
}
