//! # kc-storage-sql
//!
//! `PostgreSQL` storage for Keycloak Rust user search, built on `SQLx`.
//!
//! The role-and-attribute search is pushed into a single query (see
//! [`query`]); filtering, distinct, ordering and the offset/limit window
//! all happen in the database.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod convert;
mod entities;
mod error;
pub mod pool;
pub mod query;
mod realm;
mod role;
mod user;

pub use error::from_sqlx_error;
pub use pool::{PoolConfig, create_pool, run_migrations};
pub use realm::PgRealmProvider;
pub use role::PgRoleProvider;
pub use user::PgUserProvider;
