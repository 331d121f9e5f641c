//! User repository for database operations.

use crate::entities::{NewUser, User, UserChanges};
use crate::types::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List every user ordered by ID
    pub async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, updated_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Create new user
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id).await?.ok_or_else(|| {
            DatabaseError::QueryError("Failed to retrieve created user".to_string())
        })
    }

    /// Apply the supplied columns to a user
    pub async fn update(&self, user_id: i64, changes: &UserChanges) -> DatabaseResult<User> {
        if changes.is_empty() {
            return self
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| DatabaseError::NotFound(format!("user {user_id}")));
        }

        // Build dynamic update query based on provided fields
        let mut query_parts = Vec::new();
        let mut values = Vec::new();

        if let Some(ref name) = changes.name {
            query_parts.push("name = ?");
            values.push(name.clone());
        }

        if let Some(ref email) = changes.email {
            query_parts.push("email = ?");
            values.push(email.clone());
        }

        if let Some(ref password_hash) = changes.password_hash {
            query_parts.push("password_hash = ?");
            values.push(password_hash.clone());
        }

        query_parts.push("updated_at = ?");
        values.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE users SET {} WHERE id = ?", query_parts.join(", "));

        let mut query = sqlx::query(&query_str);
        for value in values {
            query = query.bind(value);
        }

        let result = query.bind(user_id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {user_id}")));
        }

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {user_id}")))
    }

    /// Delete user
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {id}")));
        }

        Ok(())
    }

    /// Get user count
    pub async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
