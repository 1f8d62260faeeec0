//! `PostgreSQL` implementation of the role storage provider.

use async_trait::async_trait;
use kc_model::Role;
use kc_storage::RoleProvider;
use kc_storage::error::StorageResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RoleRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` role storage provider.
pub struct PgRoleProvider {
    pool: PgPool,
}

impl PgRoleProvider {
    /// Creates a new `PostgreSQL` role provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleProvider for PgRoleProvider {
    async fn get_realm_role_by_name(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> StorageResult<Option<Role>> {
        let row: Option<RoleRow> = sqlx::query_as(
            "SELECT * FROM roles WHERE realm_id = $1 AND name = $2 AND client_id IS NULL",
        )
        .bind(realm_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(row.map(Role::from))
    }
}
