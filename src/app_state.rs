//! Application state shared across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::database::{AccountRepository, MemoryAccountRepository};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account store (Postgres in production, in-memory for tests)
    pub accounts: Arc<dyn AccountRepository>,
    /// Application configuration
    pub config: Config,
    /// Prometheus render handle; `None` when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountRepository>, config: Config) -> Self {
        Self {
            accounts,
            config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(MemoryAccountRepository::new()), config)
    }
}
