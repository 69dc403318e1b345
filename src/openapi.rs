use axum::response::Json;
use utoipa::OpenApi;

use crate::handlers::health::{HealthResponse, IndexResponse, ReadinessResponse};
use crate::models::{Account, CreateAccountRequest, UpdateAccountRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account REST API Service",
        description = "Create, read, update, delete and list customer accounts",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Health
        crate::handlers::health::index,
        crate::handlers::health::health_check,
        crate::handlers::health::readiness_check,

        // Accounts
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::list_accounts,
        crate::handlers::accounts::read_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,

        // Metrics
        crate::handlers::metrics::get_prometheus_metrics,
    ),
    components(
        schemas(
            Account,
            CreateAccountRequest,
            UpdateAccountRequest,
            IndexResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Service metadata and health probes"),
        (name = "accounts", description = "Account management"),
        (name = "metrics", description = "Prometheus metrics"),
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
