use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::application::domain::entities::{Requester, UserId};
use crate::media::application::domain::entities::Image;
use crate::media::application::ports::incoming::use_cases::{
    DeleteImageError, DeleteOwnImageUseCase, HardDeleteImageUseCase, SoftDeleteImageUseCase,
};
use crate::media::application::ports::outgoing::{
    ImageQuery, ImageRepository, ImageRepositoryError, ImageStorage,
};

pub struct DeleteImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    repository: R,
    query: Q,
    storage: Arc<dyn ImageStorage>,
}

impl<R, Q> DeleteImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    pub fn new(repository: R, query: Q, storage: Arc<dyn ImageStorage>) -> Self {
        Self {
            repository,
            query,
            storage,
        }
    }

    async fn remove_file(&self, image: &Image) {
        if !self.storage.delete(&image.file_path).await {
            warn!(image_id = %image.id, file = %image.file_path, "Image file was not removed");
        }
    }

    async fn existing(&self, image_id: Uuid) -> Result<Image, DeleteImageError> {
        self.query
            .find_by_id(image_id)
            .await
            .map_err(|e| DeleteImageError::RepositoryError(e.to_string()))?
            .ok_or(DeleteImageError::NotFound)
    }

    /// File first, then the row (which also clears a matching profile URL).
    async fn purge(&self, existing: &Image) -> Result<Image, DeleteImageError> {
        self.remove_file(existing).await;
        self.repository
            .delete(existing.id)
            .await
            .map_err(map_repo_err)
    }
}

fn map_repo_err(err: ImageRepositoryError) -> DeleteImageError {
    match err {
        ImageRepositoryError::NotFound => DeleteImageError::NotFound,
        other => DeleteImageError::RepositoryError(other.to_string()),
    }
}

#[async_trait]
impl<R, Q> SoftDeleteImageUseCase for DeleteImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    async fn execute(&self, requester: Requester, image_id: Uuid) -> Result<Image, DeleteImageError> {
        if !requester.is_admin {
            return Err(DeleteImageError::Forbidden);
        }

        let image = self
            .repository
            .deactivate(image_id)
            .await
            .map_err(map_repo_err)?;
        self.remove_file(&image).await;

        info!(%image_id, "Image soft-deleted");
        Ok(image)
    }
}

#[async_trait]
impl<R, Q> HardDeleteImageUseCase for DeleteImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    async fn execute(&self, requester: Requester, image_id: Uuid) -> Result<Image, DeleteImageError> {
        if !requester.is_admin {
            return Err(DeleteImageError::Forbidden);
        }

        let existing = self.existing(image_id).await?;
        let removed = self.purge(&existing).await?;

        info!(%image_id, "Image permanently deleted");
        Ok(removed)
    }
}

#[async_trait]
impl<R, Q> DeleteOwnImageUseCase for DeleteImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    async fn execute(&self, owner: UserId, image_id: Uuid) -> Result<Image, DeleteImageError> {
        let existing = self.existing(image_id).await?;
        if existing.user_id != owner {
            warn!(%image_id, user_id = %owner, "Refused to delete another user's image");
            return Err(DeleteImageError::NotFound);
        }
        let removed = self.purge(&existing).await?;

        info!(%image_id, user_id = %owner, "Own image deleted");
        Ok(removed)
    }
}
