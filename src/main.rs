use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use account_service::config::Config;
use account_service::router::build_router;
use account_service::startup::{init_tracing, initialize_app, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (.env first, then the process environment)
    let config = Config::from_env()?;

    init_tracing(config.log_format);
    info!("Loaded configuration for environment: {}", config.environment);

    let app_state = initialize_app(&config).await?;
    let app = build_router(app_state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting account service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}
