use async_trait::async_trait;

use crate::auth::application::domain::entities::{Requester, UserId};
use crate::auth::application::ports::outgoing::UserQuery;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizeError {
    #[error("User not found")]
    UserNotFound,

    #[error("Admin privileges required")]
    NotAdmin,

    #[error("Query error: {0}")]
    QueryError(String),
}

/// Runs after authentication: resolves the caller and requires the admin flag.
#[async_trait]
pub trait AuthorizeAdminUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<Requester, AuthorizeError>;
}

#[derive(Clone)]
pub struct AuthorizeAdminService<Q: UserQuery> {
    query: Q,
}

impl<Q: UserQuery> AuthorizeAdminService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q: UserQuery> AuthorizeAdminUseCase for AuthorizeAdminService<Q> {
    async fn execute(&self, user_id: UserId) -> Result<Requester, AuthorizeError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthorizeError::QueryError(e.to_string()))?
            .ok_or(AuthorizeError::UserNotFound)?;

        if !user.is_admin {
            tracing::warn!(user_id = %user_id, "Admin access denied");
            return Err(AuthorizeError::NotAdmin);
        }

        Ok(user.as_requester())
    }
}
