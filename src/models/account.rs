//! Account entity and its request payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A persisted customer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    /// Server-assigned identifier, immutable after creation
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "1 Main Street, Springfield")]
    pub address: String,
    #[schema(example = "555-123-4567")]
    pub phone_number: Option<String>,
    /// Serialized as `YYYY-MM-DD`
    pub date_joined: NaiveDate,
}

impl Account {
    /// Merge the fields present in `changes`; `id` never changes.
    pub fn apply(&mut self, changes: UpdateAccountRequest) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(phone_number) = changes.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(date_joined) = changes.date_joined {
            self.date_joined = date_joined;
        }
    }
}

/// Request body for `POST /accounts`
///
/// Unknown fields (including a client-supplied `id`) are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    #[validate(length(min = 1, max = 64))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,

    #[validate(length(min = 1, max = 256))]
    #[schema(example = "1 Main Street, Springfield")]
    pub address: String,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    /// Defaults to the current UTC date
    pub date_joined: Option<NaiveDate>,
}

impl CreateAccountRequest {
    pub fn into_new_account(self, today: NaiveDate) -> NewAccount {
        NewAccount {
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            date_joined: self.date_joined.unwrap_or(today),
        }
    }
}

/// A validated account waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

impl NewAccount {
    pub fn with_id(self, id: i64) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            date_joined: self.date_joined,
        }
    }
}

/// Request body for `PUT /accounts/{id}`
///
/// Absent fields are left untouched. `phone_number: null` clears the number.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_phone_update"))]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Option<Option<String>>,

    pub date_joined: Option<NaiveDate>,
}

/// Distinguish a field sent as `null` (`Some(None)`) from an absent one (`None`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_phone_update(
    request: &UpdateAccountRequest,
) -> Result<(), validator::ValidationError> {
    match &request.phone_number {
        Some(Some(number)) if number.chars().count() > 32 => {
            let mut err = validator::ValidationError::new("length");
            err.message = Some("phone_number must be at most 32 characters".into());
            Err(err)
        }
        _ => Ok(()),
    }
}
