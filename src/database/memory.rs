//! In-memory account store for testing and development

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccountRepository;
use crate::error::ApiError;
use crate::models::{Account, NewAccount, UpdateAccountRequest};

#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    data: Arc<RwLock<MemoryStore>>,
}

#[derive(Default)]
struct MemoryStore {
    accounts: BTreeMap<i64, Account>,
    /// Last id handed out; ids are never reused
    last_id: i64,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, ApiError> {
        let mut store = self.data.write().await;
        store.last_id += 1;
        let account = account.with_id(store.last_id);
        store.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ApiError> {
        Ok(self.data.read().await.accounts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, ApiError> {
        Ok(self.data.read().await.accounts.values().cloned().collect())
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateAccountRequest,
    ) -> Result<Option<Account>, ApiError> {
        let mut store = self.data.write().await;
        Ok(store.accounts.get_mut(&id).map(|account| {
            account.apply(changes);
            account.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        Ok(self.data.write().await.accounts.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, ApiError> {
        Ok(self.data.read().await.accounts.len() as i64)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
