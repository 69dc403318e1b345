//! Storage seam for accounts.
//!
//! Handlers only see [`AccountRepository`]; the Postgres store backs the
//! running service and the in-memory store backs tests and local runs.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Account, NewAccount, UpdateAccountRequest};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account and return it with its assigned id
    async fn create(&self, account: NewAccount) -> Result<Account, ApiError>;

    /// Find account by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ApiError>;

    /// All accounts ordered by id
    async fn find_all(&self) -> Result<Vec<Account>, ApiError>;

    /// Apply `changes` to an existing account; `None` when the id is unknown
    async fn update(
        &self,
        id: i64,
        changes: UpdateAccountRequest,
    ) -> Result<Option<Account>, ApiError>;

    /// Delete by id, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;

    /// Count all accounts
    async fn count(&self) -> Result<i64, ApiError>;

    /// Cheap liveness probe of the backing store
    async fn ping(&self) -> Result<(), ApiError>;

    /// Short backend name for logs and readiness output
    fn backend(&self) -> &'static str;
}
