use async_trait::async_trait;
use uuid::Uuid;

use crate::media::application::domain::entities::Image;
use crate::media::application::ports::outgoing::ImageQueryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetImageError {
    #[error("Image not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ImageQueryError> for GetImageError {
    fn from(err: ImageQueryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

/// Public lookup; inactive images are reported as missing.
#[async_trait]
pub trait GetImageUseCase: Send + Sync {
    async fn execute(&self, image_id: Uuid) -> Result<Image, GetImageError>;
}
