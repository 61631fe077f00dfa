use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::password_policy::validate_password;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("User not found")]
    NotFound,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ChangePasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ChangePasswordError>;
}

#[derive(Clone)]
pub struct ChangePasswordService<Q: UserQuery, R: UserRepository> {
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<Q: UserQuery, R: UserRepository> ChangePasswordService<Q, R> {
    pub fn new(query: Q, repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q: UserQuery, R: UserRepository> ChangePasswordUseCase for ChangePasswordService<Q, R> {
    async fn execute(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ChangePasswordError> {
        validate_password(new_password)
            .map_err(|e| ChangePasswordError::WeakPassword(e.to_string()))?;

        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| ChangePasswordError::RepositoryError(e.to_string()))?
            .ok_or(ChangePasswordError::NotFound)?;

        let matches = self
            .password_hasher
            .verify_password(current_password, &user.password_hash)
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;
        if !matches {
            return Err(ChangePasswordError::IncorrectCurrentPassword);
        }

        let new_hash = self
            .password_hasher
            .hash_password(new_password)
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user_id, new_hash)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ChangePasswordError::NotFound,
                other => ChangePasswordError::RepositoryError(other.to_string()),
            })
    }
}
