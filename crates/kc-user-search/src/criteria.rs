//! Role-and-attribute search requests.

use kc_storage::{AttributeCriteria, AttributeFilter, UserSearchCriteria};

use crate::error::{SearchError, SearchResult};

/// A role-and-attribute search as requested by a caller.
///
/// The role is given by name and resolved against the realm when the
/// search runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleAttributeSearch {
    /// Filter by enabled status.
    pub enabled: Option<bool>,
    /// Filter by exact username.
    pub username: Option<String>,
    /// Filter by realm role name.
    pub role_name: Option<String>,
    /// Attribute filters.
    pub attributes: AttributeCriteria,
    /// Number of matches to skip.
    pub offset: Option<usize>,
    /// Maximum number of matches to return.
    pub limit: Option<usize>,
}

impl RoleAttributeSearch {
    /// Creates a search without constraints.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: None,
            username: None,
            role_name: None,
            attributes: AttributeCriteria::new(),
            offset: None,
            limit: None,
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

    /// Filters by role name.
    #[must_use]
    pub fn role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Sets the attribute filters.
    #[must_use]
    pub fn attributes(mut self, attributes: AttributeCriteria) -> Self {
        self.attributes = attributes;
        self
    }

    /// Skips the first `offset` matches.
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns at most `limit` matches.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Rejects attribute entries without candidate values.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidCriteria`] naming the first empty entry.
    pub fn validate(&self) -> SearchResult<()> {
        validate_attributes(&self.attributes)
    }

    /// Converts to storage criteria with an already resolved role id.
    #[must_use]
    pub fn to_storage_criteria(&self, role_id: Option<String>) -> UserSearchCriteria {
        UserSearchCriteria {
            enabled: self.enabled,
            username: self.username.clone(),
            role_id,
            attributes: self.attributes.clone(),
            offset: self.offset,
            max_results: self.limit,
        }
    }
}

/// Rejects attribute entries without candidate values.
///
/// # Errors
///
/// Returns [`SearchError::InvalidCriteria`] naming the first empty entry.
pub fn validate_attributes(attributes: &AttributeCriteria) -> SearchResult<()> {
    match attributes.first_empty_entry() {
        Some((kind, name)) => Err(SearchError::empty_candidates(kind.field_name(), name)),
        None => Ok(()),
    }
}

/// Rejects entries of a single filter without candidate values.
///
/// `field` names the request field the filter was read from.
///
/// # Errors
///
/// Returns [`SearchError::InvalidCriteria`] naming the first empty entry.
pub fn validate_filter(field: &str, filter: &AttributeFilter) -> SearchResult<()> {
    match filter.iter().find(|(_, values)| values.is_empty()) {
        Some((name, _)) => Err(SearchError::empty_candidates(field, name)),
        None => Ok(()),
    }
}
