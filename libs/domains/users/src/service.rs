use std::sync::Arc;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{User, UserPayload};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every stored user
    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        let users = self.repository.select_all_users().await?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Get a user by ID, `None` when unknown
    pub async fn get_user(&self, user_uid: Uuid) -> UserResult<Option<User>> {
        let user = self.repository.select_user_by_user_uid(user_uid).await?;
        tracing::debug!(user_uid = %user_uid, found = user.is_some(), "Looked up user");
        Ok(user)
    }

    /// Insert a new user under a freshly generated identifier.
    ///
    /// Any `userUid` carried by the payload is discarded.
    pub async fn insert_user(&self, payload: UserPayload) -> UserResult<usize> {
        let (count, _) = self.insert_user_returning_uid(payload).await?;
        Ok(count)
    }

    /// Same as [`insert_user`](Self::insert_user), also returning the generated identifier.
    pub async fn insert_user_returning_uid(
        &self,
        payload: UserPayload,
    ) -> UserResult<(usize, Uuid)> {
        let user_uid = Uuid::new_v4();
        let user = payload.into_user(user_uid);
        let count = self.repository.insert_user(user_uid, user).await?;
        Ok((count, user_uid))
    }

    /// Replace an existing user.
    ///
    /// Returns 0 without touching storage when the payload carries no
    /// identifier or the identifier is unknown.
    pub async fn update_user(&self, payload: UserPayload) -> UserResult<usize> {
        let Some(user_uid) = payload.user_uid else {
            tracing::debug!("Update rejected: payload has no userUid");
            return Ok(0);
        };

        if self.get_user(user_uid).await?.is_none() {
            tracing::debug!(user_uid = %user_uid, "Update rejected: user not found");
            return Ok(0);
        }

        self.repository.update_user(payload.into_user(user_uid)).await
    }

    /// Remove a user; returns 0 when the user does not exist.
    pub async fn remove_user(&self, user_uid: Uuid) -> UserResult<usize> {
        if self.get_user(user_uid).await?.is_none() {
            return Ok(0);
        }

        self.repository.delete_user_by_user_uid(user_uid).await
    }
}
