//! In-memory storage backend.
//!
//! Holds realms, roles, users and role mappings behind `RwLock`s and
//! implements every provider trait by scanning. Useful for tests and for
//! user sources that are not backed by a relational database.

use std::collections::HashSet;

use async_trait::async_trait;
use kc_model::{Realm, Role, RoleMapping, User};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::realm::RealmProvider;
use crate::role::RoleProvider;
use crate::user::{UserProvider, UserSearchCriteria};

/// In-memory store implementing the realm, role and user providers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    realms: RwLock<Vec<Realm>>,
    roles: RwLock<Vec<Role>>,
    users: RwLock<Vec<User>>,
    role_mappings: RwLock<Vec<RoleMapping>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a realm.
    pub fn add_realm(&self, realm: Realm) {
        self.realms.write().push(realm);
    }

    /// Adds a role.
    pub fn add_role(&self, role: Role) {
        self.roles.write().push(role);
    }

    /// Adds a user, replacing any user with the same id.
    pub fn add_user(&self, user: User) {
        let mut users = self.users.write();
        users.retain(|u| u.id != user.id);
        users.push(user);
    }

    /// Maps a role id to a user. Duplicate mappings are ignored.
    pub fn grant_role(&self, user_id: Uuid, role_id: impl Into<String>) {
        let mapping = RoleMapping::new(user_id, role_id);
        let mut mappings = self.role_mappings.write();
        if !mappings.contains(&mapping) {
            mappings.push(mapping);
        }
    }

    /// Realm users sorted by username bytes, ties broken by id.
    fn sorted_users(&self, realm_id: Uuid) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .read()
            .iter()
            .filter(|u| u.realm_id == realm_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        users
    }

    /// Ids of users holding a role mapping, optionally restricted to one role id.
    fn mapped_user_ids(&self, role_id: Option<&str>) -> HashSet<Uuid> {
        self.role_mappings
            .read()
            .iter()
            .filter(|m| role_id.is_none_or(|id| m.role_id == id))
            .map(|m| m.user_id)
            .collect()
    }
}

fn window<T>(items: Vec<T>, first: usize, max: Option<usize>) -> Vec<T> {
    let rest = items.into_iter().skip(first);
    match max {
        Some(max) => rest.take(max).collect(),
        None => rest.collect(),
    }
}

#[async_trait]
impl RealmProvider for InMemoryStore {
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Realm>> {
        Ok(self.realms.read().iter().find(|r| r.name == name).cloned())
    }
}

#[async_trait]
impl RoleProvider for InMemoryStore {
    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .iter()
            .find(|r| r.realm_id == realm_id && r.is_realm_role() && r.name == name)
            .cloned())
    }
}

#[async_trait]
impl UserProvider for InMemoryStore {
    async fn list(
        &self,
        realm_id: Uuid,
        first: usize,
        max: Option<usize>,
    ) -> StorageResult<Vec<User>> {
        Ok(window(self.sorted_users(realm_id), first, max))
    }

    async fn search_by_attribute(
        &self,
        realm_id: Uuid,
        name: &str,
        value: &str,
    ) -> StorageResult<Vec<User>> {
        Ok(self
            .sorted_users(realm_id)
            .into_iter()
            .filter(|u| u.attribute_values(name).iter().any(|v| v == value))
            .collect())
    }

    async fn search(
        &self,
        realm_id: Uuid,
        criteria: &UserSearchCriteria,
    ) -> StorageResult<Vec<User>> {
        let mapped = self.mapped_user_ids(criteria.role_id.as_deref());
        let matches: Vec<User> = self
            .sorted_users(realm_id)
            .into_iter()
            .filter(|u| mapped.contains(&u.id))
            .filter(|u| criteria.matches_profile(u))
            .filter(|u| criteria.attributes.matches(&u.attributes))
            .collect();

        Ok(window(
            matches,
            criteria.offset.unwrap_or(0),
            criteria.max_results,
        ))
    }
}
