use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::{AuthError, TokenError, TokenProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error(transparent)]
    Rejected(AuthError),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

impl From<TokenError> for RefreshTokenError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Auth(auth) => RefreshTokenError::Rejected(auth),
            TokenError::EncodingError(msg) => RefreshTokenError::TokenGenerationFailed(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

#[derive(Clone)]
pub struct RefreshTokenUseCase {
    token_provider: Arc<dyn TokenProvider>,
}

impl RefreshTokenUseCase {
    pub fn new(token_provider: Arc<dyn TokenProvider>) -> Self {
        Self { token_provider }
    }
}

#[async_trait]
impl IRefreshTokenUseCase for RefreshTokenUseCase {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        let access_token = self.token_provider.refresh(&request.refresh_token)?;
        Ok(RefreshTokenResponse { access_token })
    }
}
