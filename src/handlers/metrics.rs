// Metrics endpoint for Prometheus

use crate::{error::ApiError, AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Prometheus metrics endpoint
///
/// 404 when the service runs without an installed recorder (e.g. in tests).
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain"),
        (status = 404, description = "Metrics recorder not installed")
    )
)]
pub async fn get_prometheus_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handle = state
        .metrics_handle
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Metrics recorder is not installed".to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}
