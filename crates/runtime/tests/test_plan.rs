use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use roster_config::AppConfig;
use roster_runtime::{self, BackendServices};
use sqlx::Row;
use tempfile::TempDir;
use tokio::time::{sleep, timeout};

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}

fn build_config(database_url: String, max_connections: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url;
    config.database.max_connections = max_connections;
    config
}

async fn initialise(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_runs_migrations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/init.db");
    let config = build_config(sqlite_url(&db_path), 4);

    let services = initialise(&config).await?;
    let table: String = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'users'",
    )
    .fetch_one(&services.db_pool)
    .await?;

    assert_eq!("users", table);

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_database_creates_sqlite_directory_if_missing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_dir = temp_dir.path().join("nested");
    let db_path = db_dir.join("prepared.db");
    let config = build_config(sqlite_url(&db_path), 2);

    assert!(!db_dir.exists());

    let services = initialise(&config).await?;
    assert!(db_dir.exists(), "database directory should be created");
    assert!(db_path.exists(), "sqlite database file should be created");
    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_database_enables_sqlite_foreign_keys() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/foreign_keys.db");
    let config = build_config(sqlite_url(&db_path), 2);

    let services = initialise(&config).await?;

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&services.db_pool)
        .await?;
    assert_eq!(1, enabled, "foreign key enforcement must be enabled");

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_database_applies_max_connections_setting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/max_conn.db");
    let max_connections = 3;
    let config = build_config(sqlite_url(&db_path), max_connections);

    let services = initialise(&config).await?;
    assert_eq!(
        max_connections,
        services.db_pool.options().get_max_connections()
    );

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn memory_database_creates_no_files() -> Result<()> {
    let config = build_config("sqlite://:memory:".into(), 4);
    let services = initialise(&config).await?;

    assert_eq!(1, services.db_pool.options().get_max_connections());

    let databases = sqlx::query("PRAGMA database_list")
        .fetch_all(&services.db_pool)
        .await?;
    let main_db = databases
        .into_iter()
        .find(|row| {
            row.try_get::<String, _>("name")
                .map(|name| name == "main")
                .unwrap_or(false)
        })
        .context("expected main in PRAGMA database_list")?;
    let file: String = main_db.try_get("file")?;
    assert!(
        file.is_empty(),
        "in-memory sqlite database should not create filesystem entries"
    );

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failures_carry_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A directory cannot be opened as a database file.
    let config = build_config(sqlite_url(temp_dir.path()), 1);

    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected connecting to a directory to fail"),
        Err(error) => error,
    };
    let message = format!("{error:#}");
    assert!(
        message.contains("failed to initialise database"),
        "expected initialisation context, got {message}"
    );

    Ok(())
}

#[test]
fn telemetry_init_tracing_sets_global_subscriber() {
    roster_runtime::telemetry::init_tracing("debug")
        .expect("first initialisation should succeed");

    let second = roster_runtime::telemetry::init_tracing("info");
    assert!(
        second.is_err(),
        "initialising telemetry twice should fail with global subscriber already set"
    );
}

#[tokio::test(flavor = "multi_thread")]
#[cfg_attr(not(unix), ignore = "requires Unix signal handling")]
async fn shutdown_signal_completes_on_ctrl_c_notification() -> Result<()> {
    let shutdown_task = tokio::spawn(async { roster_runtime::shutdown_signal().await });

    sleep(Duration::from_millis(50)).await;
    #[cfg(unix)]
    unsafe {
        libc::raise(libc::SIGINT);
    }

    timeout(Duration::from_secs(2), shutdown_task).await??;
    Ok(())
}
