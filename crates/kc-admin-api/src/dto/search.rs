//! Search request and response DTOs.
//!
//! Field names follow the JSON bodies accepted under
//! `/realms/{realm}/users`.

use kc_storage::{AttributeCriteria, AttributeFilter};
use kc_user_search::{ContinueToken, PagedUsers, RoleAttributeSearch};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dto::user::{UserRepresentation, to_representations};

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /search` (equals-only search).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserRequest {
    /// Attribute name to accepted values.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: AttributeFilter,
}

/// Body of `POST /search-by-attributes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchByEqualsAndStartsWithRequest {
    /// Exact matches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_equals: AttributeFilter,
    /// Prefix matches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_starts_with: AttributeFilter,
}

/// Continuation pagination of `POST /v2/search-by-attributes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributesPagination {
    /// Position to resume from. Absent means the first page, negative
    /// means no pages remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<i64>,
    /// Page size. Absent or not positive disables paging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Body of `POST /v2/search-by-attributes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchByAttributesRequest {
    /// Exact matches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_equals: AttributeFilter,
    /// Stored value starts with a candidate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_starts_with: AttributeFilter,
    /// Stored value is a prefix of a candidate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_that_are_start_for: AttributeFilter,
    /// Paging.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: AttributesPagination,
}

impl SearchByAttributesRequest {
    /// Collects the three attribute filters.
    #[must_use]
    pub fn attribute_criteria(&self) -> AttributeCriteria {
        AttributeCriteria {
            equals: self.attributes_equals.clone(),
            starts_with: self.attributes_starts_with.clone(),
            that_are_start_for: self.attributes_that_are_start_for.clone(),
        }
    }

    /// Returns the requested token (first page when absent).
    #[must_use]
    pub fn continue_token(&self) -> ContinueToken {
        self.pagination
            .continue_token
            .map_or(ContinueToken::START, ContinueToken::new)
    }

    /// Returns the page size, or `None` when paging is disabled.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.pagination
            .limit
            .and_then(|limit| usize::try_from(limit).ok())
            .filter(|limit| *limit > 0)
    }
}

/// Response of `POST /v2/search-by-attributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchByAttributesResponse {
    /// Matches on this page.
    pub users: Vec<UserRepresentation>,
    /// Token for the next page (`-1` on the last page).
    pub pagination: AttributesPagination,
}

impl From<PagedUsers> for SearchByAttributesResponse {
    fn from(page: PagedUsers) -> Self {
        Self {
            users: to_representations(page.users),
            pagination: AttributesPagination {
                continue_token: Some(page.next.value()),
                limit: None,
            },
        }
    }
}

/// Offset pagination of `POST /search-by-role-and-attributes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPagination {
    /// Matches to skip. Absent or negative starts at the beginning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum matches. Absent or negative means no limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Body of `POST /search-by-role-and-attributes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAndAttributesSearchRequest {
    /// Realm role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// Enabled status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Exact username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Exact matches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_equals: AttributeFilter,
    /// Stored value starts with a candidate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_starts_with: AttributeFilter,
    /// Stored value is a prefix of a candidate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes_that_are_start_for: AttributeFilter,
    /// Paging.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: OffsetPagination,
}

impl RoleAndAttributesSearchRequest {
    /// Converts into a search.
    #[must_use]
    pub fn into_search(self) -> RoleAttributeSearch {
        RoleAttributeSearch {
            enabled: self.enabled,
            username: self.username,
            role_name: self.role_name,
            attributes: AttributeCriteria {
                equals: self.attributes_equals,
                starts_with: self.attributes_starts_with,
                that_are_start_for: self.attributes_that_are_start_for,
            },
            offset: non_negative(self.pagination.offset),
            limit: non_negative(self.pagination.limit),
        }
    }
}

fn non_negative(value: Option<i64>) -> Option<usize> {
    value.and_then(|v| usize::try_from(v).ok())
}

/// Response of `POST /search-by-role-and-attributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAndAttributesSearchResponse {
    /// Matches in username order.
    pub users: Vec<UserRepresentation>,
}
