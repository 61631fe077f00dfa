use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::shared::patch::PatchField;

/// Row to insert once the file is safely on disk.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: i64,
    pub mime_type: String,
    pub image_type: ImageType,
    pub user_id: UserId,
    pub project_id: Option<Uuid>,
    pub blog_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct ImageMetadataPatch {
    pub image_type: Option<ImageType>,
    pub project_id: PatchField<Uuid>,
    pub blog_id: PatchField<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRepositoryError {
    #[error("Image not found")]
    NotFound,

    #[error("Owner not found")]
    OwnerNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Writes to the image registry. Every method runs in one transaction and keeps
/// the owner's profile image URLs in step with the active profile rows.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Inserts an active row. For hero/about/avatar the owner's previous active image
    /// of that type is deactivated and the owner's matching URL column is updated.
    async fn record_image(&self, image: NewImage) -> Result<Image, ImageRepositoryError>;

    /// Marks an active image inactive. Missing or already inactive is `NotFound`.
    async fn deactivate(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError>;

    /// Removes the row and returns what was removed.
    async fn delete(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError>;

    async fn update_metadata(
        &self,
        image_id: Uuid,
        patch: ImageMetadataPatch,
    ) -> Result<Image, ImageRepositoryError>;
}
