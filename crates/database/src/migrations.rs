//! Database migrations

use anyhow::Context;
use sqlx::{migrate::Migrator, SqlitePool};
use tracing::info;

// Include migrations from the migrations directory
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!("database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::prepare_database;
    use roster_config::DatabaseConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_migrations_create_users_table() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_migrations.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = prepare_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'users'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(tables, vec!["users".to_string()]);

        // Applying twice is a no-op.
        run_migrations(&pool).await.unwrap();
    }
}
