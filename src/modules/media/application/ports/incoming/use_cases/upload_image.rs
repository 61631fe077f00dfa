use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Requester;
use crate::media::application::domain::entities::{Image, ImageType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("File type not allowed: {0}")]
    InvalidFileType(String),

    #[error("File exceeds the {max_bytes} byte limit")]
    FileTooLarge { max_bytes: u64 },

    #[error("Maximum {max} images per {image_type} reached")]
    LimitExceeded { image_type: ImageType, max: u64 },

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Storage failed: {0}")]
    StorageFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone)]
pub struct UploadImageCommand {
    pub requester: Requester,
    pub original_filename: String,
    pub bytes: Vec<u8>,
    pub image_type: ImageType,
    /// Project or blog the image belongs to; ignored for other types.
    pub entity_id: Option<Uuid>,
}

#[async_trait]
pub trait UploadImageUseCase: Send + Sync {
    async fn execute(&self, command: UploadImageCommand) -> Result<Image, UploadError>;
}
