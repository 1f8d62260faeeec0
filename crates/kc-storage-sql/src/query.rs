//! Role-and-attribute search query construction.
//!
//! The query is rooted at `user_role_mappings` and inner-joined to `users`,
//! so only users holding at least one role mapping can appear. Every
//! attribute entry gets its own `user_attributes` alias: one alias per
//! entry lets two entries with different names be satisfied by two
//! different attribute rows of the same user.
//!
//! ```text
//! SELECT DISTINCT u.* FROM user_role_mappings urm
//! JOIN users u ON u.id = urm.user_id
//! JOIN user_attributes a0 ON a0.user_id = u.id
//! WHERE u.realm_id = $1 AND (a0.name = $2 AND a0.value = ANY($3))
//! ORDER BY u.username, u.id
//! ```

use kc_storage::attribute::expand_prefixes;
use kc_storage::{AttributeMatch, UserSearchCriteria};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Columns selected for a [`UserRow`](crate::entities::UserRow).
pub(crate) const USER_COLUMNS: &str = "u.id, u.realm_id, u.username, u.enabled, u.email, \
     u.email_verified, u.first_name, u.last_name, u.created_at";

/// Escapes `LIKE` metacharacters and appends the trailing wildcard.
///
/// `PostgreSQL` uses `\` as the default `LIKE` escape character.
#[must_use]
pub fn like_prefix(candidate: &str) -> String {
    let mut pattern = String::with_capacity(candidate.len() + 1);
    for ch in candidate.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Builds the role-and-attribute search query for one realm.
///
/// The criteria's role must already be resolved to a role id.
#[must_use]
pub fn role_attribute_query(
    realm_id: Uuid,
    criteria: &UserSearchCriteria,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT DISTINCT ");
    qb.push(USER_COLUMNS);
    qb.push(" FROM user_role_mappings urm JOIN users u ON u.id = urm.user_id");

    for idx in 0..criteria.attributes.len() {
        qb.push(format!(" JOIN user_attributes a{idx} ON a{idx}.user_id = u.id"));
    }

    qb.push(" WHERE u.realm_id = ").push_bind(realm_id);

    if let Some(enabled) = criteria.enabled {
        qb.push(" AND u.enabled = ").push_bind(enabled);
    }
    if let Some(username) = &criteria.username {
        qb.push(" AND u.username = ").push_bind(username.clone());
    }
    if let Some(role_id) = &criteria.role_id {
        qb.push(" AND urm.role_id = ").push_bind(role_id.clone());
    }

    for (idx, (kind, name, candidates)) in criteria.attributes.entries().enumerate() {
        qb.push(format!(" AND (a{idx}.name = "))
            .push_bind(name.to_string());

        match kind {
            AttributeMatch::Equals => {
                qb.push(format!(" AND a{idx}.value = ANY("))
                    .push_bind(candidates.to_vec());
            }
            AttributeMatch::StartsWith => {
                let patterns: Vec<String> = candidates.iter().map(|c| like_prefix(c)).collect();
                qb.push(format!(" AND a{idx}.value LIKE ANY("))
                    .push_bind(patterns);
            }
            AttributeMatch::ThatAreStartFor => {
                qb.push(format!(" AND a{idx}.value = ANY("))
                    .push_bind(expand_prefixes(candidates));
            }
        }
        qb.push("))");
    }

    qb.push(" ORDER BY u.username, u.id");

    if let Some(limit) = criteria.max_results {
        qb.push(" LIMIT ").push_bind(to_i64(limit));
    }
    if let Some(offset) = criteria.offset.filter(|o| *o > 0) {
        qb.push(" OFFSET ").push_bind(to_i64(offset));
    }

    qb
}

pub(crate) fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
