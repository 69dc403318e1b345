//! Account CRUD handlers
//!
//! POST   /accounts        create
//! GET    /accounts        list
//! GET    /accounts/{id}   read
//! PUT    /accounts/{id}   update
//! DELETE /accounts/{id}   delete

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::{debug, info};

use super::extractors::{ValidatedJson, ValidatedPath};
use crate::error::{ApiError, Result};
use crate::models::{Account, CreateAccountRequest, UpdateAccountRequest};
use crate::AppState;

pub const ACCOUNTS_PATH: &str = "/accounts";

/// URL of a single account, used for the `Location` header
pub fn account_location(id: i64) -> String {
    format!("{}/{}", ACCOUNTS_PATH, id)
}

fn account_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Account with id [{}] could not be found.", id))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    request_body(content = CreateAccountRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Account created", body = Account,
            headers(("Location" = String, description = "URL of the new account"))),
        (status = 400, description = "Missing or invalid fields"),
        (status = 415, description = "Content-Type is not application/json")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAccountRequest>,
) -> Result<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let account = state.accounts.create(request.into_new_account(today)).await?;

    info!(account_id = account.id, "Account created");

    let location = account_location(account.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account),
    ))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "All accounts, possibly empty", body = [Account])
    )
)]
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    let accounts = state.accounts.find_all().await?;
    debug!(count = accounts.len(), "Listing accounts");
    Ok(Json(accounts))
}

/// Read a single account
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 404, description = "No account with this id")
    )
)]
pub async fn read_account(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<Account>> {
    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| account_not_found(id))?;

    Ok(Json(account))
}

/// Update the fields present in the body
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    request_body(content = UpdateAccountRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Account updated", body = Account),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "No account with this id"),
        (status = 415, description = "Content-Type is not application/json")
    )
)]
pub async fn update_account(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(changes): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<Account>> {
    let account = state
        .accounts
        .update(id, changes)
        .await?
        .ok_or_else(|| account_not_found(id))?;

    info!(account_id = id, "Account updated");
    Ok(Json(account))
}

/// Delete an account; succeeds whether or not it existed
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted or already absent")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode> {
    if state.accounts.delete(id).await? {
        info!(account_id = id, "Account deleted");
    } else {
        debug!(account_id = id, "Delete requested for absent account");
    }

    Ok(StatusCode::NO_CONTENT)
}
