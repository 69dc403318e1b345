use account_service::config::DEFAULT_DATABASE_URI;
use account_service::database::{self, AccountRepository, PgAccountRepository};
use account_service::models::{NewAccount, UpdateAccountRequest};
use anyhow::Result;
use chrono::NaiveDate;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

async fn setup_repository() -> Option<PgAccountRepository> {
    dotenvy::dotenv().ok();
    let uri = std::env::var("DATABASE_URI").unwrap_or_else(|_| DEFAULT_DATABASE_URI.to_string());

    let pool = match timeout(Duration::from_secs(5), database::setup_database(&uri, 2)).await {
        Ok(Ok(pool)) => pool,
        _ => return None,
    };
    database::run_migrations(&pool).await.ok()?;

    Some(PgAccountRepository::new(pool))
}

fn new_account() -> NewAccount {
    let tag = Uuid::new_v4().simple().to_string();
    NewAccount {
        name: format!("PG User {}", &tag[..8]),
        email: format!("pg-{}@example.com", &tag[..12]),
        address: "42 Database Road".to_string(),
        phone_number: Some("555-123-0000".to_string()),
        date_joined: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
    }
}

#[tokio::test]
async fn test_postgres_account_lifecycle() -> Result<()> {
    let Some(repo) = setup_repository().await else {
        println!("Skipping test: PostgreSQL not available");
        return Ok(());
    };

    // Create
    let draft = new_account();
    let created = repo.create(draft.clone()).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, draft.name);
    assert_eq!(created.date_joined, draft.date_joined);

    // Read
    let found = repo.find_by_id(created.id).await?.expect("account should exist");
    assert_eq!(found, created);

    // List contains it
    let all = repo.find_all().await?;
    assert!(all.iter().any(|a| a.id == created.id));
    assert!(repo.count().await? >= 1);

    // Update merges only the present fields
    let updated = repo
        .update(
            created.id,
            UpdateAccountRequest {
                phone_number: Some(Some("999-888-7777".to_string())),
                ..Default::default()
            },
        )
        .await?
        .expect("account should be updated");
    assert_eq!(updated.phone_number.as_deref(), Some("999-888-7777"));
    assert_eq!(updated.email, created.email);

    // Clearing the phone number
    let cleared = repo
        .update(
            created.id,
            UpdateAccountRequest {
                phone_number: Some(None),
                ..Default::default()
            },
        )
        .await?
        .expect("account should be updated");
    assert_eq!(cleared.phone_number, None);

    // Delete is idempotent
    assert!(repo.delete(created.id).await?);
    assert!(!repo.delete(created.id).await?);
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_postgres_missing_account() -> Result<()> {
    let Some(repo) = setup_repository().await else {
        println!("Skipping test: PostgreSQL not available");
        return Ok(());
    };

    assert!(repo.find_by_id(0).await?.is_none());
    assert!(repo.update(0, UpdateAccountRequest::default()).await?.is_none());
    assert!(!repo.delete(0).await?);
    repo.ping().await?;
    assert!(repo.count().await? >= 0);
    assert_eq!(repo.backend(), "postgres");

    Ok(())
}

#[tokio::test]
async fn test_postgres_ids_are_not_reused() -> Result<()> {
    let Some(repo) = setup_repository().await else {
        println!("Skipping test: PostgreSQL not available");
        return Ok(());
    };

    let first = repo.create(new_account()).await?;
    repo.delete(first.id).await?;
    let second = repo.create(new_account()).await?;
    assert!(second.id > first.id);

    repo.delete(second.id).await?;
    Ok(())
}
