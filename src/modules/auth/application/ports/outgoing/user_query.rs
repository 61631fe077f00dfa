use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;

    /// Case-insensitive match on the stored address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError>;

    /// Owner of the public portfolio: the oldest admin, else the oldest user.
    async fn find_portfolio_owner(&self) -> Result<Option<User>, UserQueryError>;
}
