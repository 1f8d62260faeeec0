//! `PostgreSQL` implementation of the user storage provider.
//!
//! Every read runs in one `REPEATABLE READ` read-only transaction, so the
//! matching query and the attribute load see the same snapshot.

use async_trait::async_trait;
use kc_model::User;
use kc_storage::UserProvider;
use kc_storage::error::StorageResult;
use kc_storage::user::UserSearchCriteria;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::convert::{group_attributes, users_from_rows};
use crate::entities::{AttributeRow, UserRow};
use crate::error::from_sqlx_error;
use crate::query::{USER_COLUMNS, role_attribute_query, to_i64};

pub(crate) const SNAPSHOT_READ: &str =
    "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// `PostgreSQL` user storage provider.
pub struct PgUserProvider {
    pool: PgPool,
}

impl PgUserProvider {
    /// Creates a new `PostgreSQL` user provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin_snapshot(&self) -> StorageResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(from_sqlx_error)?;
        sqlx::query(SNAPSHOT_READ)
            .execute(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;
        Ok(tx)
    }
}

/// Loads attributes for the given rows and builds users in row order.
async fn hydrate(conn: &mut PgConnection, rows: Vec<UserRow>) -> StorageResult<Vec<User>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let attributes: Vec<AttributeRow> = sqlx::query_as(
        "SELECT user_id, name, value FROM user_attributes WHERE user_id = ANY($1) ORDER BY id",
    )
    .bind(&ids)
    .fetch_all(conn)
    .await
    .map_err(from_sqlx_error)?;

    Ok(users_from_rows(rows, group_attributes(attributes)))
}

#[async_trait]
impl UserProvider for PgUserProvider {
    async fn list(
        &self,
        realm_id: Uuid,
        first: usize,
        max: Option<usize>,
    ) -> StorageResult<Vec<User>> {
        let mut tx = self.begin_snapshot().await?;

        // LIMIT NULL means no limit
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.realm_id = $1 \
             ORDER BY u.username, u.id LIMIT $2 OFFSET $3"
        ))
        .bind(realm_id)
        .bind(max.map(to_i64))
        .bind(to_i64(first))
        .fetch_all(&mut *tx)
        .await
        .map_err(from_sqlx_error)?;

        let users = hydrate(&mut tx, rows).await?;
        tx.commit().await.map_err(from_sqlx_error)?;
        Ok(users)
    }

    async fn search_by_attribute(
        &self,
        realm_id: Uuid,
        name: &str,
        value: &str,
    ) -> StorageResult<Vec<User>> {
        let mut tx = self.begin_snapshot().await?;

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT DISTINCT {USER_COLUMNS} FROM users u \
             JOIN user_attributes a ON a.user_id = u.id \
             WHERE u.realm_id = $1 AND a.name = $2 AND a.value = $3 \
             ORDER BY u.username, u.id"
        ))
        .bind(realm_id)
        .bind(name)
        .bind(value)
        .fetch_all(&mut *tx)
        .await
        .map_err(from_sqlx_error)?;

        let users = hydrate(&mut tx, rows).await?;
        tx.commit().await.map_err(from_sqlx_error)?;
        Ok(users)
    }

    async fn search(
        &self,
        realm_id: Uuid,
        criteria: &UserSearchCriteria,
    ) -> StorageResult<Vec<User>> {
        let mut query = role_attribute_query(realm_id, criteria);

        tracing::debug!(sql = query.sql(), "Running role-and-attribute search");

        let mut tx = self.begin_snapshot().await?;
        let rows: Vec<UserRow> = query
            .build_query_as()
            .fetch_all(&mut *tx)
            .await
            .map_err(from_sqlx_error)?;

        let users = hydrate(&mut tx, rows).await?;
        tx.commit().await.map_err(from_sqlx_error)?;
        Ok(users)
    }
}
