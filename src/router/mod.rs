//! Router configuration module
//!
//! Account CRUD under `/accounts`, health probes, metrics and the OpenAPI document.

use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::app_state::AppState;
use crate::config::SecurityConfig;
use crate::handlers::{self, accounts, health, metrics::get_prometheus_metrics};
use crate::middleware::{add_security_headers, metrics_middleware, request_logger_middleware};
use crate::openapi::openapi_json;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let security = app_state.config.security.clone();
    let timeout = Duration::from_secs(app_state.config.request_timeout);

    let health_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let account_routes = Router::new()
        .route(
            "/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/accounts/{id}",
            get(accounts::read_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        );

    health_routes
        .merge(account_routes)
        .route("/metrics", get(get_prometheus_metrics))
        .route("/api/docs/openapi.json", get(openapi_json))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(request_logger_middleware))
                .layer(cors_layer(&security))
                .layer(from_fn_with_state(security, add_security_headers))
                .layer(from_fn(metrics_middleware))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    timeout,
                )),
        )
        .with_state(app_state)
}

/// CORS for the configured origins; an empty list allows any origin
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origin = if security.cors_allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([header::LOCATION, HeaderName::from_static("x-request-id")])
}
