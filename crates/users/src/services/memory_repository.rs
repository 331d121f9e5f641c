//! In-memory user repository used by tests and the `new_in_memory` service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use roster_database::{NewUser, User, UserChanges};
use tokio::sync::RwLock;

use super::user_service::UserRepo;
use crate::types::{UserError, UserResult};

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Store {
    users: BTreeMap<i64, StoredUser>,
    next_id: i64,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|(id, stored)| Some(*id) != except && stored.user.email == email)
    }
}

/// Repository that keeps users in process memory.
///
/// Emails are unique, ids are assigned sequentially from 1 and never reused.
#[derive(Default)]
pub struct MemoryUserRepository {
    store: RwLock<Store>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored password hash for a user, if the user exists.
    pub async fn password_hash(&self, user_id: i64) -> Option<String> {
        let store = self.store.read().await;
        store
            .users
            .get(&user_id)
            .map(|stored| stored.password_hash.clone())
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().map(|stored| stored.user.clone()).collect())
    }

    async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        if store.email_taken(&new_user.email, None) {
            return Err(UserError::EmailAlreadyExists);
        }

        store.next_id += 1;
        let now = Utc::now().to_rfc3339();
        let user = User {
            id: store.next_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            created_at: now.clone(),
            updated_at: now,
        };

        store.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash.clone(),
            },
        );

        Ok(user)
    }

    async fn update(&self, user_id: i64, changes: &UserChanges) -> UserResult<User> {
        let mut store = self.store.write().await;
        if let Some(ref email) = changes.email {
            if store.email_taken(email, Some(user_id)) {
                return Err(UserError::EmailAlreadyExists);
            }
        }

        let stored = store
            .users
            .get_mut(&user_id)
            .ok_or(UserError::NotFound(user_id))?;

        if changes.is_empty() {
            return Ok(stored.user.clone());
        }

        if let Some(ref name) = changes.name {
            stored.user.name = name.clone();
        }
        if let Some(ref email) = changes.email {
            stored.user.email = email.clone();
        }
        if let Some(ref password_hash) = changes.password_hash {
            stored.password_hash = password_hash.clone();
        }
        stored.user.updated_at = Utc::now().to_rfc3339();

        Ok(stored.user.clone())
    }

    async fn delete(&self, user_id: i64) -> UserResult<()> {
        let mut store = self.store.write().await;
        store
            .users
            .remove(&user_id)
            .map(|_| ())
            .ok_or(UserError::NotFound(user_id))
    }

    async fn count(&self) -> UserResult<i64> {
        let store = self.store.read().await;
        Ok(store.users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "A".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = MemoryUserRepository::new();

        let first = repo.create(&new_user("a@x.com")).await.unwrap();
        let second = repo.create(&new_user("b@x.com")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        repo.delete(second.id).await.unwrap();
        let third = repo.create(&new_user("c@x.com")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn update_rejects_email_owned_by_another_user() {
        let repo = MemoryUserRepository::new();
        let first = repo.create(&new_user("a@x.com")).await.unwrap();
        repo.create(&new_user("b@x.com")).await.unwrap();

        let clash = UserChanges {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(first.id, &clash).await,
            Err(UserError::EmailAlreadyExists)
        ));

        let own = UserChanges {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(repo.update(first.id, &own).await.is_ok());
    }

    #[tokio::test]
    async fn missing_rows_report_not_found() {
        let repo = MemoryUserRepository::new();

        assert!(repo.find_by_id(7).await.unwrap().is_none());
        assert!(matches!(
            repo.update(7, &UserChanges::default()).await,
            Err(UserError::NotFound(7))
        ));
        assert!(matches!(repo.delete(7).await, Err(UserError::NotFound(7))));
    }
}
