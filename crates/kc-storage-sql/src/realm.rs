//! `PostgreSQL` implementation of the realm storage provider.

use async_trait::async_trait;
use kc_model::Realm;
use kc_storage::RealmProvider;
use kc_storage::error::StorageResult;
use sqlx::PgPool;

use crate::entities::RealmRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` realm storage provider.
pub struct PgRealmProvider {
    pool: PgPool,
}

impl PgRealmProvider {
    /// Creates a new `PostgreSQL` realm provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RealmProvider for PgRealmProvider {
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Realm>> {
        let row: Option<RealmRow> = sqlx::query_as("SELECT * FROM realms WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Realm::from))
    }
}
