//! # kc-model
//!
//! Domain models for Keycloak Rust user search.
//!
//! - [`User`] - a realm user with free-form, multi-valued attributes
//! - [`Role`] / [`RoleMapping`] - realm roles and their assignment to users
//! - [`Realm`] - the tenant namespace users and roles live in

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod realm;
pub mod role;
pub mod user;

pub use realm::Realm;
pub use role::{Role, RoleMapping};
pub use user::User;
