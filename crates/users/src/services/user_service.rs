//! User service for managing user operations.

use async_trait::async_trait;
use roster_database::{DatabaseError, NewUser, SqlitePool, User, UserChanges, UserRepository};

use super::memory_repository::MemoryUserRepository;
use crate::types::{CreateUserInput, UpdateUserInput, UserError, UserResult};
use crate::utils::hash_password;

/// Service for managing user operations
pub struct UserService<R> {
    user_repository: R,
}

impl UserService<UserRepository> {
    /// Create a new user service instance with real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
        }
    }
}

impl UserService<MemoryUserRepository> {
    /// Create a user service backed by process memory
    pub fn new_in_memory() -> Self {
        Self {
            user_repository: MemoryUserRepository::new(),
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepo,
{
    pub fn with_repository(user_repository: R) -> Self {
        Self { user_repository }
    }

    pub fn repository(&self) -> &R {
        &self.user_repository
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUserInput) -> UserResult<User> {
        let new_user = NewUser {
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
        };

        let user = self.user_repository.create(&new_user).await?;

        tracing::info!(user_id = user.id, email = %user.email, "created user");

        Ok(user)
    }

    /// List every user ordered by ID
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.user_repository.find_all().await
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: i64) -> UserResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    /// Update a user
    pub async fn update_user(&self, user_id: i64, input: UpdateUserInput) -> UserResult<User> {
        // Check if user exists
        let existing = self.get_user(user_id).await?;

        if input.is_empty() {
            return Ok(existing);
        }

        let password_hash = match input.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password_hash,
        };

        let updated = self.user_repository.update(user_id, &changes).await?;

        tracing::info!(user_id, email = %updated.email, "updated user");

        Ok(updated)
    }

    /// Delete a user, returning the record as it was before removal
    pub async fn delete_user(&self, user_id: i64) -> UserResult<User> {
        // Check if user exists
        let user = self.get_user(user_id).await?;

        self.user_repository.delete(user_id).await?;

        tracing::warn!(user_id, email = %user.email, "deleted user");

        Ok(user)
    }

    /// Number of stored users
    pub async fn user_count(&self) -> UserResult<i64> {
        self.user_repository.count().await
    }
}

/// Storage seam used by [`UserService`].
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;
    async fn find_all(&self) -> UserResult<Vec<User>>;
    async fn create(&self, new_user: &NewUser) -> UserResult<User>;
    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User>;
    async fn delete(&self, user_id: i64) -> UserResult<()>;
    async fn count(&self) -> UserResult<i64>;
}

fn missing_user(user_id: i64) -> impl FnOnce(DatabaseError) -> UserError {
    move |err| match err {
        DatabaseError::NotFound(_) => UserError::NotFound(user_id),
        other => other.into(),
    }
}

#[async_trait]
impl UserRepo for UserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(UserRepository::find_by_id(self, id).await?)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        Ok(UserRepository::find_all(self).await?)
    }

    async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        Ok(UserRepository::create(self, new_user).await?)
    }

    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        UserRepository::update(self, user_id, changes)
            .await
            .map_err(missing_user(user_id))
    }

    async fn delete(&self, user_id: i64) -> UserResult<()> {
        UserRepository::delete(self, user_id)
            .await
            .map_err(missing_user(user_id))
    }

    async fn count(&self) -> UserResult<i64> {
        Ok(UserRepository::count(self).await?)
    }
}
