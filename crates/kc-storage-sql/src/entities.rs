//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted
//! to domain models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for realms.
#[derive(Debug, Clone, FromRow)]
pub struct RealmRow {
    pub id: Uuid,
    pub name: String,
    pub display_name: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Database row for roles.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub realm_id: Uuid,
    pub client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Database row for users.
///
/// Attributes live in `user_attributes` and are loaded separately.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub realm_id: Uuid,
    pub username: String,
    pub enabled: bool,
    pub email: Option<String>,
    pub email_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database row for a single user attribute value.
#[derive(Debug, Clone, FromRow)]
pub struct AttributeRow {
    pub user_id: Uuid,
    pub name: String,
    pub value: String,
}
