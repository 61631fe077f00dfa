use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Requester, UserId};
use crate::media::application::domain::entities::Image;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteImageError {
    #[error("Image not found")]
    NotFound,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Row stays, flagged inactive; the file is removed best-effort.
#[async_trait]
pub trait SoftDeleteImageUseCase: Send + Sync {
    async fn execute(&self, requester: Requester, image_id: Uuid) -> Result<Image, DeleteImageError>;
}

/// Row and file are both removed.
#[async_trait]
pub trait HardDeleteImageUseCase: Send + Sync {
    async fn execute(&self, requester: Requester, image_id: Uuid) -> Result<Image, DeleteImageError>;
}

/// Permanently removes one of the caller's own images. Images owned by
/// someone else read as `NotFound`.
#[async_trait]
pub trait DeleteOwnImageUseCase: Send + Sync {
    async fn execute(&self, owner: UserId, image_id: Uuid) -> Result<Image, DeleteImageError>;
}
