//! Search API router configuration.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use kc_storage::{RealmProvider, RoleProvider, UserProvider};

use crate::dto::user::to_representations;
use crate::dto::{
    RoleAndAttributesSearchRequest, RoleAndAttributesSearchResponse, SearchByAttributesRequest,
    SearchByAttributesResponse, SearchByEqualsAndStartsWithRequest, SearchUserRequest,
    UserRepresentation,
};
use crate::error::AdminResult;
use crate::state::SearchState;

// ============================================================================
// Legacy Handlers
// ============================================================================

/// POST /realms/{realm}/users/search - Equals-only search
async fn search_users<R, U, Ro>(
    State(state): State<SearchState<R, U, Ro>>,
    Path(realm_name): Path<String>,
    Json(request): Json<SearchUserRequest>,
) -> AdminResult<Json<Vec<UserRepresentation>>>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    let realm = state.realm_context(&realm_name).await?;
    let users = state
        .search
        .filter_by_attributes_equals(&realm, &request.attributes)
        .await?;

    Ok(Json(to_representations(users)))
}

/// POST /realms/{realm}/users/search-by-attributes - Equals and starts-with search
async fn search_by_equals_and_starts_with<R, U, Ro>(
    State(state): State<SearchState<R, U, Ro>>,
    Path(realm_name): Path<String>,
    Json(request): Json<SearchByEqualsAndStartsWithRequest>,
) -> AdminResult<Json<Vec<UserRepresentation>>>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    let realm = state.realm_context(&realm_name).await?;
    let users = state
        .search
        .search_by_equals_and_starts_with(
            &realm,
            &request.attributes_equals,
            &request.attributes_starts_with,
        )
        .await?;

    Ok(Json(to_representations(users)))
}

/// POST /realms/{realm}/users/v2/search-by-attributes - Paged attribute search
async fn search_by_attributes<R, U, Ro>(
    State(state): State<SearchState<R, U, Ro>>,
    Path(realm_name): Path<String>,
    Json(request): Json<SearchByAttributesRequest>,
) -> AdminResult<Json<SearchByAttributesResponse>>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    let realm = state.realm_context(&realm_name).await?;
    let page = state
        .search
        .search_by_attributes_paged(
            &realm,
            &request.attribute_criteria(),
            request.continue_token(),
            request.limit(),
        )
        .await?;

    Ok(Json(SearchByAttributesResponse::from(page)))
}

// ============================================================================
// Role-and-Attribute Handler
// ============================================================================

/// POST /realms/{realm}/users/search-by-role-and-attributes
async fn search_by_role_and_attributes<R, U, Ro>(
    State(state): State<SearchState<R, U, Ro>>,
    Path(realm_name): Path<String>,
    Json(request): Json<RoleAndAttributesSearchRequest>,
) -> AdminResult<Json<RoleAndAttributesSearchResponse>>
where
    R: RealmProvider,
    U: UserProvider,
    Ro: RoleProvider,
{
    let realm = state.realm_context(&realm_name).await?;
    let users = state
        .search
        .search_by_role_and_attributes(&realm, &request.into_search())
        .await?;

    Ok(Json(RoleAndAttributesSearchResponse {
        users: to_representations(users),
    }))
}

// ============================================================================
// Router Construction
// ============================================================================

/// Creates the user search router.
///
/// # Routes
///
/// - `POST /realms/{realm}/users/search`
/// - `POST /realms/{realm}/users/search-by-attributes`
/// - `POST /realms/{realm}/users/v2/search-by-attributes`
/// - `POST /realms/{realm}/users/search-by-role-and-attributes`
///
/// # Example
///
/// ```ignore
/// let state = SearchState::new(
///     Arc::new(realm_provider),
///     Arc::new(user_provider),
///     Arc::new(role_provider),
/// );
///
/// let app = search_router().with_state(state);
/// ```
pub fn search_router<R, U, Ro>() -> Router<SearchState<R, U, Ro>>
where
    R: RealmProvider + 'static,
    U: UserProvider + 'static,
    Ro: RoleProvider + 'static,
{
    Router::new()
        .route(
            "/realms/{realm}/users/search",
            post(search_users::<R, U, Ro>),
        )
        .route(
            "/realms/{realm}/users/search-by-attributes",
            post(search_by_equals_and_starts_with::<R, U, Ro>),
        )
        .route(
            "/realms/{realm}/users/v2/search-by-attributes",
            post(search_by_attributes::<R, U, Ro>),
        )
        .route(
            "/realms/{realm}/users/search-by-role-and-attributes",
            post(search_by_role_and_attributes::<R, U, Ro>),
        )
}
