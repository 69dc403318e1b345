//! PostgreSQL account store.

use async_trait::async_trait;
use tracing::{debug, error};

use super::{AccountRepository, DatabasePool};
use crate::error::ApiError;
use crate::models::{Account, NewAccount, UpdateAccountRequest};

const ACCOUNT_COLUMNS: &str = "id, name, email, address, phone_number, date_joined";

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: DatabasePool,
}

impl PgAccountRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, ApiError> {
        let created = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (name, email, address, phone_number, date_joined) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create account: {}", e);
            ApiError::Database(e)
        })?;

        debug!(account_id = created.id, "Inserted account row");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_all(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateAccountRequest,
    ) -> Result<Option<Account>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut account) = existing else {
            return Ok(None);
        };
        account.apply(changes);

        let updated = sqlx::query_as::<_, Account>(&format!(
            "UPDATE accounts \
             SET name = $2, email = $3, address = $4, phone_number = $5, date_joined = $6 \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to update account {}: {}", id, e);
            ApiError::Database(e)
        })?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, ApiError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
