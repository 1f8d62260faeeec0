//! Realm storage provider trait.

use async_trait::async_trait;
use kc_model::Realm;

use crate::error::StorageResult;

/// Read-only provider for realm lookups.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RealmProvider: Send + Sync {
    /// Gets a realm by name.
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Realm>>;
}
