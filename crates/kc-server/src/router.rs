//! Router configuration.
//!
//! This module creates the main Axum router that combines all endpoints.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use kc_admin_api::{SearchState, search_router};
use kc_storage_sql::{PgRealmProvider, PgRoleProvider, PgUserProvider};

/// Creates the main application router over a database pool.
pub fn create_router(pool: PgPool) -> Router {
    let state = SearchState::new(
        Arc::new(PgRealmProvider::new(pool.clone())),
        Arc::new(PgUserProvider::new(pool.clone())),
        Arc::new(PgRoleProvider::new(pool.clone())),
    );
    let search = search_router().with_state(state);

    let health = Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check))
        .with_state(pool);

    Router::new()
        .route("/", get(root))
        .merge(health)
        .merge(search)
        .layer(TraceLayer::new_for_http())
}

/// Root endpoint handler.
async fn root() -> Json<ServerInfo> {
    Json(ServerInfo {
        name: "Keycloak Rust User Search".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

/// Server information response.
#[derive(Serialize)]
pub struct ServerInfo {
    name: String,
    version: String,
}

/// Basic health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
}

/// Kubernetes liveness probe.
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe; requires a working database connection.
async fn readiness_check(State(pool): State<PgPool>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
