//! User search entry points.

use std::collections::HashSet;
use std::sync::Arc;

use kc_model::User;
use kc_storage::{AttributeCriteria, AttributeFilter, AttributeMatch, UserProvider};
use tracing::debug;

use crate::criteria::{RoleAttributeSearch, validate_attributes, validate_filter};
use crate::error::SearchResult;
use crate::filter;
use crate::paging::{ContinueToken, PagedUsers, scan_page};
use crate::realm::RealmContext;

/// Request field of the legacy equals-only search.
const LEGACY_EQUALS_FIELD: &str = "attributes";

/// Runs user searches against a [`UserProvider`].
pub struct UserSearchService<U: UserProvider> {
    users: Arc<U>,
}

impl<U: UserProvider> Clone for UserSearchService<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<U: UserProvider> UserSearchService<U> {
    /// Creates a search service over a user provider.
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Searches role-mapped users by role, profile fields and attributes.
    ///
    /// The role name is resolved through the realm; a name the realm does
    /// not know is matched literally against mapped role ids. Users
    /// without any role mapping never match.
    ///
    /// # Errors
    ///
    /// Returns an error for attribute entries without candidates, or if
    /// storage fails.
    pub async fn search_by_role_and_attributes(
        &self,
        realm: &dyn RealmContext,
        search: &RoleAttributeSearch,
    ) -> SearchResult<Vec<User>> {
        search.validate()?;

        let role_id = match &search.role_name {
            Some(name) => Some(
                realm
                    .resolve_role_id(name)
                    .await?
                    .unwrap_or_else(|| name.clone()),
            ),
            None => None,
        };

        let criteria = search.to_storage_criteria(role_id);
        let users = self.users.search(realm.realm_id(), &criteria).await?;

        debug!(
            realm = realm.realm_name(),
            role = ?criteria.role_id,
            attribute_entries = criteria.attributes.len(),
            found = users.len(),
            "Searched users by role and attributes"
        );

        Ok(users)
    }

    /// Finds realm users matching every equals entry.
    ///
    /// Candidates come from an indexed lookup on the first entry; the whole
    /// filter is then applied in memory. An empty filter returns every
    /// realm user. Results are ordered by username.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without candidates, or if storage fails.
    pub async fn filter_by_attributes_equals(
        &self,
        realm: &dyn RealmContext,
        equals: &AttributeFilter,
    ) -> SearchResult<Vec<User>> {
        validate_filter(LEGACY_EQUALS_FIELD, equals)?;
        self.equals_search(realm, equals).await
    }

    async fn equals_search(
        &self,
        realm: &dyn RealmContext,
        equals: &AttributeFilter,
    ) -> SearchResult<Vec<User>> {
        let realm_id = realm.realm_id();
        let Some((name, values)) = equals.iter().next() else {
            return Ok(self.users.list(realm_id, 0, None).await?);
        };

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for value in values {
            for user in self.users.search_by_attribute(realm_id, name, value).await? {
                if seen.insert(user.id) {
                    candidates.push(user);
                }
            }
        }
        candidates.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));

        let users = filter::filter_by_attributes_equals(candidates, equals);
        debug!(
            realm = realm.realm_name(),
            entries = equals.len(),
            found = users.len(),
            "Filtered users by attribute equality"
        );
        Ok(users)
    }

    /// Combines an equals search with a starts-with filter.
    ///
    /// Without equals entries every realm user is filtered by starts-with;
    /// without starts-with entries this is the equals search.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without candidates, or if storage fails.
    pub async fn search_by_equals_and_starts_with(
        &self,
        realm: &dyn RealmContext,
        equals: &AttributeFilter,
        starts_with: &AttributeFilter,
    ) -> SearchResult<Vec<User>> {
        validate_filter(AttributeMatch::Equals.field_name(), equals)?;
        validate_filter(AttributeMatch::StartsWith.field_name(), starts_with)?;

        if equals.is_empty() {
            let users = self.users.list(realm.realm_id(), 0, None).await?;
            return Ok(filter::filter_by_attributes_starts_with(users, starts_with));
        }

        let users = self.equals_search(realm, equals).await?;
        if starts_with.is_empty() {
            return Ok(users);
        }
        Ok(filter::filter_by_attributes_starts_with(users, starts_with))
    }

    /// Scans the realm listing for one page of attribute matches.
    ///
    /// See [`scan_page`] for the token and limit rules.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without candidates, or if storage fails.
    pub async fn search_by_attributes_paged(
        &self,
        realm: &dyn RealmContext,
        attributes: &AttributeCriteria,
        token: ContinueToken,
        limit: Option<usize>,
    ) -> SearchResult<PagedUsers> {
        validate_attributes(attributes)?;

        let page = scan_page(
            self.users.as_ref(),
            realm.realm_id(),
            attributes,
            token,
            limit,
        )
        .await?;

        debug!(
            realm = realm.realm_name(),
            token = token.value(),
            ?limit,
            found = page.users.len(),
            next = page.next.value(),
            "Scanned users by attributes"
        );

        Ok(page)
    }
}
