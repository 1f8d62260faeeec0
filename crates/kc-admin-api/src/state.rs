//! Search API state.

use std::sync::Arc;

use kc_storage::{RealmProvider, RoleProvider, UserProvider};
use kc_user_search::{RealmRoles, UserSearchService};

use crate::error::{AdminError, AdminResult};

/// State shared by the search endpoints.
///
/// Uses `Arc` for thread-safe shared ownership.
pub struct SearchState<R, U, Ro>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    /// Realm storage provider.
    pub realm_provider: Arc<R>,
    /// Role storage provider.
    pub role_provider: Arc<Ro>,
    /// Search service over the user provider.
    pub search: UserSearchService<U>,
}

// Manual Clone implementation that doesn't require T: Clone for Arc<T>
impl<R, U, Ro> Clone for SearchState<R, U, Ro>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    fn clone(&self) -> Self {
        Self {
            realm_provider: Arc::clone(&self.realm_provider),
            role_provider: Arc::clone(&self.role_provider),
            search: self.search.clone(),
        }
    }
}

impl<R, U, Ro> SearchState<R, U, Ro>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    /// Creates a new search state.
    pub fn new(realm_provider: Arc<R>, user_provider: Arc<U>, role_provider: Arc<Ro>) -> Self {
        Self {
            realm_provider,
            role_provider,
            search: UserSearchService::new(user_provider),
        }
    }

    /// Resolves the realm named in the request path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown realm.
    pub async fn realm_context(&self, realm_name: &str) -> AdminResult<RealmRoles<Ro>> {
        let realm = self
            .realm_provider
            .get_by_name(realm_name)
            .await?
            .ok_or_else(|| AdminError::not_found("Realm", realm_name))?;

        Ok(RealmRoles::new(realm, Arc::clone(&self.role_provider)))
    }
}
