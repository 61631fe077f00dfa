use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed")]
    HashFailed,

    #[error("Background task failed")]
    TaskFailed,
}

/// Credential store: one-way hashing and constant-time verification.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// A malformed stored hash verifies as `false`; only a failed background task is an error.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
