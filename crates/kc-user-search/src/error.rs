//! User search error types.

use kc_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during a user search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The criteria cannot be evaluated as given.
    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// The underlying store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SearchError {
    /// Creates an error for an attribute entry without candidate values.
    ///
    /// `field` is the request field holding the entry.
    #[must_use]
    pub fn empty_candidates(field: &str, name: &str) -> Self {
        Self::InvalidCriteria(format!("{field}.{name} must list at least one value"))
    }
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
