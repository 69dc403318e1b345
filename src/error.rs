use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::middleware::current_request_id;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,
    #[serde(rename = "VAL_3002")]
    MissingRequiredField,
    #[serde(rename = "VAL_3003")]
    InvalidFormat,
    #[serde(rename = "VAL_3004")]
    UnsupportedMediaType,
    #[serde(rename = "VAL_3005")]
    PayloadTooLarge,

    // Resource errors (4xxx)
    #[serde(rename = "RES_4001")]
    NotFound,
    #[serde(rename = "RES_4002")]
    RouteNotFound,

    // Database errors (7xxx)
    #[serde(rename = "DB_7001")]
    DatabaseConnectionFailed,
    #[serde(rename = "DB_7002")]
    QueryFailed,

    // External service errors (8xxx)
    #[serde(rename = "EXT_8005")]
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 3001,
            ErrorCode::MissingRequiredField => 3002,
            ErrorCode::InvalidFormat => 3003,
            ErrorCode::UnsupportedMediaType => 3004,
            ErrorCode::PayloadTooLarge => 3005,

            ErrorCode::NotFound => 4001,
            ErrorCode::RouteNotFound => 4002,

            ErrorCode::DatabaseConnectionFailed => 7001,
            ErrorCode::QueryFailed => 7002,

            ErrorCode::ServiceUnavailable => 8005,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::MissingRequiredField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format provided",
            ErrorCode::UnsupportedMediaType => "Content-Type must be application/json",
            ErrorCode::PayloadTooLarge => "Request body is too large",

            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::RouteNotFound => "The requested URL was not found on the server",

            ErrorCode::DatabaseConnectionFailed => "Database connection failed",
            ErrorCode::QueryFailed => "Database query failed",

            ErrorCode::ServiceUnavailable => "Service is currently unavailable",
        }
    }
}

/// Structured error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub code_number: u16,
    pub message: String,
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Request body rejected: {1}")]
    BodyRejected(StatusCode, String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{1}")]
    WithCode(ErrorCode, String),

    #[error("{1}")]
    WithCodeAndDetails(ErrorCode, String, String),

    #[error("Validation failed: {field}")]
    ValidationWithField {
        code: ErrorCode,
        field: String,
        message: String,
    },
}

impl ApiError {
    /// Create error with specific error code
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::WithCode(code, message.into())
    }

    /// Create error with code and additional details
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError::WithCodeAndDetails(code, message.into(), details.into())
    }

    /// Create validation error for specific field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationWithField {
            code: ErrorCode::InvalidInput,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Required field absent from the request body
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        ApiError::ValidationWithField {
            code: ErrorCode::MissingRequiredField,
            message: format!("Required field '{}' is missing", field),
            field,
        }
    }

    /// Get error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::BadRequest(_) => ErrorCode::InvalidInput,
            ApiError::Validation(_) => ErrorCode::InvalidInput,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::UnsupportedMediaType(_) => ErrorCode::UnsupportedMediaType,
            ApiError::BodyRejected(status, _) if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                ErrorCode::PayloadTooLarge
            }
            ApiError::BodyRejected(_, _) => ErrorCode::InvalidInput,
            ApiError::Database(sqlx::Error::PoolTimedOut)
            | ApiError::Database(sqlx::Error::PoolClosed)
            | ApiError::Database(sqlx::Error::Io(_)) => ErrorCode::DatabaseConnectionFailed,
            ApiError::Database(_) => ErrorCode::QueryFailed,
            ApiError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
            ApiError::WithCode(code, _) => *code,
            ApiError::WithCodeAndDetails(code, _, _) => *code,
            ApiError::ValidationWithField { code, .. } => *code,
        }
    }

    /// Get error details
    fn error_details(&self) -> Option<String> {
        match self {
            ApiError::WithCodeAndDetails(_, _, details) => Some(details.clone()),
            ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::BodyRejected(_, msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Get field name for validation errors
    fn error_field(&self) -> Option<String> {
        match self {
            ApiError::ValidationWithField { field, .. } => Some(field.clone()),
            _ => None,
        }
    }

    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) | ApiError::ValidationWithField { .. } => {
                StatusCode::BAD_REQUEST
            }

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            ApiError::BodyRejected(status, _) => *status,

            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            ApiError::WithCode(code, _) | ApiError::WithCodeAndDetails(code, _, _) => match code {
                ErrorCode::InvalidInput
                | ErrorCode::MissingRequiredField
                | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
                ErrorCode::NotFound | ErrorCode::RouteNotFound => StatusCode::NOT_FOUND,
                ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseConnectionFailed | ErrorCode::QueryFailed => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },

            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string());
        let status = self.status_code();
        let code = self.error_code();

        self.log_error(&request_id);

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code,
                code_number: code.code(),
                message: match &self {
                    ApiError::WithCode(_, msg) | ApiError::WithCodeAndDetails(_, msg, _) => {
                        msg.clone()
                    }
                    ApiError::ValidationWithField { message, .. } => message.clone(),
                    _ => code.message().to_string(),
                },
                details: self.error_details(),
                field: self.error_field(),
            },
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Convert Axum JSON rejections into structured API errors
pub fn handle_rejection(err: JsonRejection) -> ApiError {
    match err {
        JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(
            "Content-Type must be application/json".to_string(),
        ),
        JsonRejection::JsonDataError(e) => {
            let detail = e.body_text();
            match extract_backticked(&detail, "missing field `") {
                Some(field) => ApiError::missing_field(field),
                None => ApiError::with_details(
                    ErrorCode::InvalidInput,
                    "Invalid input provided",
                    detail,
                ),
            }
        }
        JsonRejection::JsonSyntaxError(e) => ApiError::with_details(
            ErrorCode::InvalidFormat,
            "Invalid JSON format",
            e.body_text(),
        ),
        JsonRejection::BytesRejection(e) => ApiError::BodyRejected(e.status(), e.body_text()),
        _ => ApiError::with_details(
            ErrorCode::InvalidInput,
            "Invalid input provided",
            err.body_text(),
        ),
    }
}

/// Convert path parameter rejections (e.g. a non-numeric id) into API errors
pub fn handle_path_rejection(err: PathRejection) -> ApiError {
    ApiError::with_details(
        ErrorCode::InvalidFormat,
        "Invalid path parameter",
        err.body_text(),
    )
}

/// Extract the name following `marker` up to the closing backtick,
/// e.g. "missing field `email` at line 1" -> "email"
fn extract_backticked(message: &str, marker: &str) -> Option<String> {
    let start = message.find(marker)? + marker.len();
    let end = message[start..].find('`')?;
    Some(message[start..start + end].to_string())
}
