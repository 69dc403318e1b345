pub mod accounts;
pub mod extractors;
pub mod health;
pub mod metrics;

pub use extractors::{ValidatedJson, ValidatedPath};

use crate::error::{ApiError, ErrorCode};

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::with_code(ErrorCode::RouteNotFound, ErrorCode::RouteNotFound.message())
}
