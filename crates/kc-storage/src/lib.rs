//! # kc-storage
//!
//! Storage abstraction traits for Keycloak Rust user search.
//!
//! This crate defines the read-only provider interfaces implemented by
//! concrete storage backends (SQL, in-memory), and the attribute predicate
//! contract every backend evaluates identically.
//!
//! ## Provider Traits
//!
//! - [`RealmProvider`] - realm lookups
//! - [`RoleProvider`] - role lookups
//! - [`UserProvider`] - user lookups, listing and role-and-attribute search
//!
//! ## Backends
//!
//! - [`memory::InMemoryStore`] - scans in-memory collections

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod attribute;
pub mod error;
pub mod memory;
pub mod realm;
pub mod role;
pub mod user;

pub use attribute::{AttributeCriteria, AttributeFilter, AttributeMatch};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use realm::RealmProvider;
pub use role::RoleProvider;
pub use user::{UserProvider, UserSearchCriteria};
