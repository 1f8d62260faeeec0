//! Realm context for searches.

use std::sync::Arc;

use async_trait::async_trait;
use kc_model::Realm;
use kc_storage::{RoleProvider, StorageResult};
use uuid::Uuid;

/// The realm a search runs in.
///
/// Every search operation takes a context, so a search without a realm
/// cannot be expressed.
#[async_trait]
pub trait RealmContext: Send + Sync {
    /// Returns the realm id.
    fn realm_id(&self) -> Uuid;

    /// Returns the realm name.
    fn realm_name(&self) -> &str;

    /// Resolves a realm role name to its role id.
    ///
    /// Returns `None` when the realm has no role with this name.
    async fn resolve_role_id(&self, role_name: &str) -> StorageResult<Option<String>>;
}

/// A realm whose roles are resolved through a [`RoleProvider`].
pub struct RealmRoles<Ro: RoleProvider> {
    realm: Realm,
    roles: Arc<Ro>,
}

impl<Ro: RoleProvider> RealmRoles<Ro> {
    /// Creates a context for a realm.
    pub const fn new(realm: Realm, roles: Arc<Ro>) -> Self {
        Self { realm, roles }
    }

    /// Returns the realm.
    #[must_use]
    pub const fn realm(&self) -> &Realm {
        &self.realm
    }
}

#[async_trait]
impl<Ro: RoleProvider> RealmContext for RealmRoles<Ro> {
    fn realm_id(&self) -> Uuid {
        self.realm.id
    }

    fn realm_name(&self) -> &str {
        &self.realm.name
    }

    async fn resolve_role_id(&self, role_name: &str) -> StorageResult<Option<String>> {
        Ok(self
            .roles
            .get_realm_role_by_name(self.realm.id, role_name)
            .await?
            .map(|role| role.id))
    }
}
