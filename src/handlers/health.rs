use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::error::{ApiError, Result};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
    pub paths: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
    pub backend: String,
    /// Number of stored accounts
    pub accounts: i64,
}

/// Service metadata
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service metadata", body = IndexResponse)
    )
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Account REST API Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        paths: super::accounts::ACCOUNTS_PATH.to_string(),
    })
}

/// Basic health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Readiness probe: checks the account store answers
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = ReadinessResponse),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let backend = state.accounts.backend();

    state.accounts.ping().await.map_err(|e| {
        error!(backend, "Readiness check failed: {}", e);
        ApiError::ServiceUnavailable(format!("{} store unreachable", backend))
    })?;

    let accounts = state.accounts.count().await.map_err(|e| {
        error!(backend, "Readiness count failed: {}", e);
        ApiError::ServiceUnavailable(format!("{} store unreachable", backend))
    })?;

    Ok(Json(ReadinessResponse {
        status: "OK".to_string(),
        database: "OK".to_string(),
        backend: backend.to_string(),
        accounts,
    }))
}
