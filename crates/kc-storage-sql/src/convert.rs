//! Conversion between database entities and domain models.

use std::collections::HashMap;

use kc_model::{Realm, Role, User};
use uuid::Uuid;

use crate::entities::{AttributeRow, RealmRow, RoleRow, UserRow};

/// Convert a `RealmRow` to a `Realm` domain model.
impl From<RealmRow> for Realm {
    fn from(row: RealmRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            enabled: row.enabled,
            created_at: row.created_at,
        }
    }
}

/// Convert a `RoleRow` to a `Role` domain model.
impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            realm_id: row.realm_id,
            client_id: row.client_id,
            created_at: row.created_at,
        }
    }
}

/// Convert a `UserRow` and its attribute values to a `User` domain model.
pub fn user_from_row(row: UserRow, attributes: HashMap<String, Vec<String>>) -> User {
    User {
        id: row.id,
        realm_id: row.realm_id,
        username: row.username,
        enabled: row.enabled,
        email: row.email,
        email_verified: row.email_verified,
        first_name: row.first_name,
        last_name: row.last_name,
        created_at: row.created_at,
        attributes,
    }
}

/// Group attribute rows by user, keeping value order per name.
pub fn group_attributes(
    rows: Vec<AttributeRow>,
) -> HashMap<Uuid, HashMap<String, Vec<String>>> {
    let mut grouped: HashMap<Uuid, HashMap<String, Vec<String>>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.user_id)
            .or_default()
            .entry(row.name)
            .or_default()
            .push(row.value);
    }
    grouped
}

/// Attach grouped attributes to user rows, preserving row order.
pub fn users_from_rows(
    rows: Vec<UserRow>,
    mut attributes: HashMap<Uuid, HashMap<String, Vec<String>>>,
) -> Vec<User> {
    rows.into_iter()
        .map(|row| {
            let attrs = attributes.remove(&row.id).unwrap_or_default();
            user_from_row(row, attrs)
        })
        .collect()
}
