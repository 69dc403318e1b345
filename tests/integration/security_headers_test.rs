use account_service::config::{Config, SecurityConfig};
use account_service::router::build_router;
use account_service::AppState;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn app_with(security: SecurityConfig) -> Router {
    let config = Config {
        security,
        ..Config::default()
    };
    build_router(AppState::in_memory(config))
}

fn https_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_security_headers() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "SAMEORIGIN");
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(
        headers.get("Content-Security-Policy").unwrap(),
        "default-src 'self'; object-src 'none'"
    );
    assert_eq!(
        headers.get("Referrer-Policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
    assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
}

#[tokio::test]
async fn test_cors_headers() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/accounts")
        .header(header::ORIGIN, "https://client.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app_with(SecurityConfig::default())
        .oneshot(request)
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_origin_list() {
    let app = app_with(SecurityConfig {
        force_https: false,
        cors_allowed_origins: vec!["https://allowed.example".to_string()],
    });

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://allowed.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://allowed.example"
    );

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://other.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_force_https_redirects() {
    let app = app_with(SecurityConfig {
        force_https: true,
        cors_allowed_origins: Vec::new(),
    });

    let request = Request::builder()
        .uri("/accounts")
        .header(header::HOST, "accounts.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://accounts.example.com/accounts"
    );

    let response = app.oneshot(https_get("/accounts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();

    let response = app_with(SecurityConfig::default())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me-42");
}

#[tokio::test]
async fn test_readiness_reports_backend() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let data: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(data["status"], "OK");
    assert_eq!(data["backend"], "memory");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("X-Frame-Options").unwrap(),
        "SAMEORIGIN"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let data: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(data["error"]["code"], "RES_4002");
    assert!(data["request_id"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/api/docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let data: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(data["paths"]["/accounts/{id}"].is_object());
}

#[tokio::test]
async fn test_metrics_without_recorder_is_not_found() {
    let response = app_with(SecurityConfig::default())
        .oneshot(https_get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
