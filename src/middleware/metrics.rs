use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Label for requests that no route matched (fallback 404s)
pub const UNMATCHED_PATH: &str = "unmatched";

/// Metrics middleware that tracks request metrics
///
/// Must be added with `Router::layer` so the matched route template is
/// available; raw URIs are never used as label values.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = metrics_path(request.extensions().get::<MatchedPath>());
    let start = Instant::now();

    gauge!("http_requests_in_flight", "path" => path.clone()).increment(1.0);

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let duration = start.elapsed();

    gauge!("http_requests_in_flight", "path" => path.clone()).decrement(1.0);

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration.as_secs_f64());

    response
}

/// Route template such as `/accounts/{id}`, or [`UNMATCHED_PATH`]
pub fn metrics_path(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}
