//! Data Transfer Objects (DTOs) for the user search API.
//!
//! These types define the request and response formats for the API.
//! They are separate from domain models to allow API evolution
//! without affecting internal structures.

pub mod search;
pub mod user;

pub use search::{
    AttributesPagination, OffsetPagination, RoleAndAttributesSearchRequest,
    RoleAndAttributesSearchResponse, SearchByAttributesRequest, SearchByAttributesResponse,
    SearchByEqualsAndStartsWithRequest, SearchUserRequest,
};
pub use user::UserRepresentation;
