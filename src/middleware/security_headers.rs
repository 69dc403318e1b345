use axum::{
    body::Body,
    extract::{Request, State},
    http::{self, header, HeaderValue, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use tracing::debug;

use crate::config::SecurityConfig;
use crate::error::ApiError;

pub const FRAME_OPTIONS: &str = "SAMEORIGIN";
pub const CONTENT_TYPE_OPTIONS: &str = "nosniff";
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; object-src 'none'";
pub const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";
pub const STRICT_TRANSPORT_SECURITY: &str = "max-age=31536000; includeSubDomains";

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Redirect plain HTTP to HTTPS when enabled, then add security headers
///
/// Headers added to every response:
/// - X-Frame-Options: SAMEORIGIN
/// - X-Content-Type-Options: nosniff
/// - Content-Security-Policy: default-src 'self'; object-src 'none'
/// - Referrer-Policy: strict-origin-when-cross-origin
///
/// HTTPS responses also get Strict-Transport-Security.
pub async fn add_security_headers(
    State(security): State<SecurityConfig>,
    request: Request,
    next: Next,
) -> Response<Body> {
    let https = is_https(&request);

    let mut response = if security.force_https && !https {
        redirect_to_https(&request)
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static(FRAME_OPTIONS));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static(CONTENT_TYPE_OPTIONS),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static(REFERRER_POLICY));

    if https {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(STRICT_TRANSPORT_SECURITY),
        );
    }

    // Remove server identification (if present)
    headers.remove(header::SERVER);

    response
}

/// True for an `https` request URI or an `X-Forwarded-Proto: https` proxy hop
pub fn is_https<B>(request: &http::Request<B>) -> bool {
    if request.uri().scheme_str() == Some("https") {
        return true;
    }

    request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

fn redirect_to_https<B>(request: &http::Request<B>) -> Response<Body> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()));

    let Some(host) = host else {
        return ApiError::BadRequest("Host header is required for HTTPS redirect".to_string())
            .into_response();
    };

    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("https://{}{}", host, path);

    debug!(location = %location, "Redirecting to HTTPS");

    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => ApiError::BadRequest("Invalid Host header".to_string()).into_response(),
    }
}
