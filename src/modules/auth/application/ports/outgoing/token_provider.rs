use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    Missing,

    #[error("Malformed or invalid token")]
    Malformed,

    #[error("Token has expired")]
    Expired,

    #[error("Wrong token type")]
    WrongKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    /// Random per token so two tokens minted in the same second still differ
    pub jti: Uuid,
    pub token_type: TokenKind,
}

pub trait TokenProvider: Send + Sync {
    fn issue_access(&self, user_id: UserId) -> Result<String, TokenError>;

    fn issue_refresh(&self, user_id: UserId) -> Result<String, TokenError>;

    /// Signature, issuer and time checks only; the kind is not inspected.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    fn authenticate(&self, token: Option<&str>, required: TokenKind) -> Result<UserId, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Missing)?;

        let claims = self.verify(token)?;
        if claims.token_type != required {
            tracing::warn!(
                expected = %required,
                actual = %claims.token_type,
                "Token type mismatch"
            );
            return Err(AuthError::WrongKind);
        }

        Ok(UserId::from(claims.sub))
    }

    /// Mints a new access token; the refresh token stays valid until it expires.
    fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let user_id = self.authenticate(Some(refresh_token), TokenKind::Refresh)?;
        tracing::debug!(user_id = %user_id, "Refresh token accepted, issuing access token");
        self.issue_access(user_id)
    }
}
