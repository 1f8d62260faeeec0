//! # kc-user-search
//!
//! Role-and-attribute user search for Keycloak Rust.
//!
//! Two strategies share the attribute predicates of
//! [`kc_storage::attribute`]:
//!
//! - [`UserSearchService::search_by_role_and_attributes`] pushes everything
//!   into the [`UserProvider`](kc_storage::UserProvider) search and pages
//!   by offset and limit.
//! - [`UserSearchService::search_by_attributes_paged`] scans the realm's
//!   user listing in memory and pages with a [`ContinueToken`].
//!
//! Every operation runs inside a [`RealmContext`].

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod criteria;
pub mod error;
pub mod filter;
pub mod paging;
pub mod realm;
pub mod service;

pub use criteria::RoleAttributeSearch;
pub use error::{SearchError, SearchResult};
pub use filter::{
    filter_by_attributes_equals, filter_by_attributes_starts_with,
    filter_by_attributes_that_are_start_for,
};
pub use paging::{ContinueToken, PagedUsers};
pub use realm::{RealmContext, RealmRoles};
pub use service::UserSearchService;
