//! # kc-admin-api
//!
//! REST endpoints for Keycloak Rust user search.
//!
//! ## Modules
//!
//! - [`dto`] - Data Transfer Objects for API requests/responses
//! - [`error`] - Error types and HTTP error responses
//! - [`router`] - Axum router and HTTP handlers
//! - [`state`] - Application state management
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/realms/{realm}/users/search` | Equals-only attribute search |
//! | POST | `/realms/{realm}/users/search-by-attributes` | Equals then starts-with search |
//! | POST | `/realms/{realm}/users/v2/search-by-attributes` | Attribute search with continue tokens |
//! | POST | `/realms/{realm}/users/search-by-role-and-attributes` | Role, profile and attribute search |

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod dto;
pub mod error;
pub mod router;
pub mod state;

pub use dto::{
    RoleAndAttributesSearchRequest, RoleAndAttributesSearchResponse, SearchByAttributesRequest,
    SearchByAttributesResponse, SearchByEqualsAndStartsWithRequest, SearchUserRequest,
    UserRepresentation,
};
pub use error::{AdminError, AdminResult, ErrorResponse};
pub use router::search_router;
pub use state::SearchState;
