//! Application startup and initialization logic

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{Config, LogFormat, StorageBackend};
use crate::database::{self, AccountRepository, MemoryAccountRepository, PgAccountRepository};

const DEFAULT_LOG_FILTER: &str = "account_service=debug,tower_http=debug";

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

/// Initialize the account store and metrics, and create the AppState.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!("Starting account service ({})", config.environment);

    // Initialize Prometheus metrics exporter
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    info!("Prometheus metrics initialized");

    let accounts = setup_account_store(config).await?;
    info!("Account store ready (backend: {})", accounts.backend());

    Ok(AppState::new(accounts, config.clone()).with_metrics(metrics_handle))
}

async fn setup_account_store(config: &Config) -> Result<Arc<dyn AccountRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryAccountRepository::new())),
        StorageBackend::Postgres => {
            let pool = database::setup_database(&config.database_uri, config.max_connections)
                .await?;
            info!("PostgreSQL connection established");

            database::run_migrations(&pool).await?;
            info!("Database migrations completed");

            Ok(Arc::new(PgAccountRepository::new(pool)))
        }
    }
}

/// Resolve on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
