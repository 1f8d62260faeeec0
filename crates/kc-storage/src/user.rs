//! User storage provider trait.

use async_trait::async_trait;
use kc_model::User;
use uuid::Uuid;

use crate::attribute::AttributeCriteria;
use crate::error::StorageResult;

/// Read-only provider for user lookups and searches.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Lists realm users ordered by username.
    ///
    /// Skips `first` users and returns at most `max` (all remaining when
    /// `None`). Repeated calls with the same window return the same users
    /// as long as the realm is not modified in between.
    async fn list(&self, realm_id: Uuid, first: usize, max: Option<usize>)
    -> StorageResult<Vec<User>>;

    /// Gets the users holding an attribute with exactly this value.
    async fn search_by_attribute(
        &self,
        realm_id: Uuid,
        name: &str,
        value: &str,
    ) -> StorageResult<Vec<User>>;

    /// Searches role-mapped users matching all criteria.
    ///
    /// Results are distinct, ordered by username and windowed by the
    /// criteria's offset and limit. Only users with at least one role
    /// mapping are considered.
    async fn search(
        &self,
        realm_id: Uuid,
        criteria: &UserSearchCriteria,
    ) -> StorageResult<Vec<User>>;
}

/// Search criteria for role-and-attribute user searches.
///
/// The role is given as an already resolved role id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserSearchCriteria {
    /// Filter by enabled status.
    pub enabled: Option<bool>,
    /// Filter by username (exact match).
    pub username: Option<String>,
    /// Filter by mapped role id.
    pub role_id: Option<String>,
    /// Attribute filters.
    pub attributes: AttributeCriteria,
    /// Offset for pagination.
    pub offset: Option<usize>,
    /// Maximum results to return.
    pub max_results: Option<usize>,
}

impl UserSearchCriteria {
    /// Creates a new search criteria.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: None,
            username: None,
            role_id: None,
            attributes: AttributeCriteria::new(),
            offset: None,
            max_results: None,
        }
    }

    /// Filters by enabled status.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Filters by username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Filters by role id.
    #[must_use]
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Sets the attribute filters.
    #[must_use]
    pub fn attributes(mut self, attributes: AttributeCriteria) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets offset for pagination.
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets maximum results.
    #[must_use]
    pub const fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Checks the non-attribute fields against a user.
    #[must_use]
    pub fn matches_profile(&self, user: &User) -> bool {
        self.enabled.is_none_or(|enabled| user.enabled == enabled)
            && self
                .username
                .as_deref()
                .is_none_or(|username| user.username == username)
    }
}
