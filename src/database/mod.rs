use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::{info, warn};

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryAccountRepository;
pub use postgres::PgAccountRepository;
pub use repository::AccountRepository;

pub type DatabasePool = Pool<Postgres>;

pub async fn setup_database(database_uri: &str, max_connections: u32) -> Result<DatabasePool> {
    info!("Connecting to database");

    if !(database_uri.contains("sslmode=require")
        || database_uri.contains("sslmode=verify-ca")
        || database_uri.contains("sslmode=verify-full"))
    {
        warn!("Database connection does not enforce SSL. Consider adding sslmode=require to connection string");
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(180))
        .max_lifetime(Duration::from_secs(900))
        .test_before_acquire(true)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("SET timezone = 'UTC'").execute(&mut *conn).await?;
                sqlx::query("SET statement_timeout = '15s'")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(database_uri)
        .await?;

    let start_time = std::time::Instant::now();
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        max_connections,
        "✅ Database connection established in {:?}",
        start_time.elapsed()
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
