//! Request extractors that turn framework rejections into [`ApiError`]s.
//!
//! `ValidatedJson` enforces the JSON content type (415), decodes the body
//! (400 on missing or mistyped fields) and runs the `validator` rules (400).

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{handle_path_rejection, handle_rejection, ApiError};

/// JSON body that has passed its `validator` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(handle_rejection)?;

        value.validate().map_err(validation_error)?;

        Ok(Self(value))
    }
}

/// Path parameters with structured errors on parse failure
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(handle_path_rejection)?;

        Ok(Self(value))
    }
}

/// Report the first failing field (alphabetically, so responses are stable)
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().cloned().collect();
    fields.sort();

    let Some(field) = fields.into_iter().next() else {
        return ApiError::Validation(errors.to_string());
    };

    let message = field_errors
        .get(&field)
        .and_then(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Field '{}' failed '{}' validation", field, err.code),
        })
        .unwrap_or_else(|| format!("Field '{}' is invalid", field));

    if field == "__all__" {
        ApiError::Validation(message)
    } else {
        ApiError::validation_field(field.to_string(), message)
    }
}
