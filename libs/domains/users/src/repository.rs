use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{Gender, User};

/// Repository trait for User persistence
///
/// Mutations report an affected-count: 1 when a record was written or
/// removed, 0 when nothing matched. A miss is never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All stored users, in no particular order
    async fn select_all_users(&self) -> UserResult<Vec<User>>;

    /// Look up a user by identifier
    async fn select_user_by_user_uid(&self, user_uid: Uuid) -> UserResult<Option<User>>;

    /// Store `user` under `user_uid`, replacing any previous record with that key
    async fn insert_user(&self, user_uid: Uuid, user: User) -> UserResult<usize>;

    /// Replace the record keyed by `user.user_uid`, if one exists
    async fn update_user(&self, user: User) -> UserResult<usize>;

    /// Remove the record keyed by `user_uid`, if one exists
    async fn delete_user_by_user_uid(&self, user_uid: Uuid) -> UserResult<usize>;
}

/// In-memory record store, seeded with a single user on construction.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Store seeded with the demo user "Joe Jones".
    pub fn new() -> Self {
        let seed = User::new(
            Uuid::new_v4(),
            "Joe",
            "Jones",
            Gender::Male,
            22,
            "joe.jones@gmail.com",
        );
        Self::with_users([seed])
    }

    /// Store without any records.
    pub fn empty() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store holding `users`, each keyed by its own identifier.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.user_uid, u)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn select_all_users(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn select_user_by_user_uid(&self, user_uid: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&user_uid).cloned())
    }

    async fn insert_user(&self, user_uid: Uuid, user: User) -> UserResult<usize> {
        let mut users = self.users.write().await;
        if users.insert(user_uid, user).is_some() {
            tracing::debug!(user_uid = %user_uid, "Replaced existing user on insert");
        }

        tracing::info!(user_uid = %user_uid, "Inserted user");
        Ok(1)
    }

    async fn update_user(&self, user: User) -> UserResult<usize> {
        let mut users = self.users.write().await;
        let user_uid = user.user_uid;

        match users.get_mut(&user_uid) {
            Some(existing) => {
                *existing = user;
                tracing::info!(user_uid = %user_uid, "Updated user");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user_by_user_uid(&self, user_uid: Uuid) -> UserResult<usize> {
        let mut users = self.users.write().await;

        if users.remove(&user_uid).is_some() {
            tracing::info!(user_uid = %user_uid, "Deleted user");
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
