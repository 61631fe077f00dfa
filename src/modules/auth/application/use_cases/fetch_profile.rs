use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::UserQuery;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchUserError {
    #[error("User not found")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<User, FetchUserError>;
}

/// Profile shown on the public site, no authentication involved.
#[async_trait]
pub trait FetchPublicProfileUseCase: Send + Sync {
    async fn execute(&self) -> Result<User, FetchUserError>;
}

#[derive(Clone)]
pub struct FetchProfileService<Q: UserQuery> {
    query: Q,
}

impl<Q: UserQuery> FetchProfileService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q: UserQuery> FetchUserProfileUseCase for FetchProfileService<Q> {
    async fn execute(&self, user_id: UserId) -> Result<User, FetchUserError> {
        self.query
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchUserError::QueryError(e.to_string()))?
            .ok_or(FetchUserError::NotFound)
    }
}

#[async_trait]
impl<Q: UserQuery> FetchPublicProfileUseCase for FetchProfileService<Q> {
    async fn execute(&self) -> Result<User, FetchUserError> {
        self.query
            .find_portfolio_owner()
            .await
            .map_err(|e| FetchUserError::QueryError(e.to_string()))?
            .ok_or(FetchUserError::NotFound)
    }
}
