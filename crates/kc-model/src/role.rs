//! Role domain model.
//!
//! Roles are assigned to users through [`RoleMapping`] records. Role ids
//! are opaque strings: a mapping may reference an id that is not present
//! in the realm's role catalog (for example a role name stored verbatim).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A realm or client role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    // === Identity ===
    /// Unique identifier.
    pub id: String,
    /// Role name (unique within realm or client).
    pub name: String,
    /// Role description.
    pub description: Option<String>,

    // === Scope ===
    /// Realm this role belongs to.
    pub realm_id: Uuid,
    /// Client this role belongs to (None for realm roles).
    pub client_id: Option<Uuid>,

    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new realm role with a generated id.
    #[must_use]
    pub fn new_realm_role(realm_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            description: None,
            realm_id,
            client_id: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a new client role with a generated id.
    #[must_use]
    pub fn new_client_role(realm_id: Uuid, client_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::new_realm_role(realm_id, name)
        }
    }

    /// Replaces the generated id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Checks if this is a realm role.
    #[must_use]
    pub const fn is_realm_role(&self) -> bool {
        self.client_id.is_none()
    }
}

/// Assignment of a role id to a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMapping {
    /// The user holding the role.
    pub user_id: Uuid,
    /// The assigned role id.
    pub role_id: String,
}

impl RoleMapping {
    /// Creates a new role mapping.
    #[must_use]
    pub fn new(user_id: Uuid, role_id: impl Into<String>) -> Self {
        Self {
            user_id,
            role_id: role_id.into(),
        }
    }
}
