use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Requester;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::media::application::ports::outgoing::ImageMetadataPatch;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateImageError {
    #[error("Image not found")]
    NotFound,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Maximum {max} active images per {image_type}")]
    LimitExceeded { image_type: ImageType, max: u64 },

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone)]
pub struct UpdateImageCommand {
    pub requester: Requester,
    pub image_id: Uuid,
    pub patch: ImageMetadataPatch,
}

#[async_trait]
pub trait UpdateImageUseCase: Send + Sync {
    async fn execute(&self, command: UpdateImageCommand) -> Result<Image, UpdateImageError>;
}
