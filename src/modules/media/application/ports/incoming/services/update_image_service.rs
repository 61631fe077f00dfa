use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::media::application::domain::entities::{EntityKind, Image, ImageType};
use crate::media::application::ports::incoming::use_cases::{
    UpdateImageCommand, UpdateImageError, UpdateImageUseCase,
};
use crate::media::application::ports::outgoing::{
    ImageMetadataPatch, ImageQuery, ImageRepository, ImageRepositoryError,
};

pub struct UpdateImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    repository: R,
    query: Q,
    max_images_per_entity: u64,
}

impl<R, Q> UpdateImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    pub fn new(repository: R, query: Q, max_images_per_entity: u64) -> Self {
        Self {
            repository,
            query,
            max_images_per_entity,
        }
    }

    /// Entity the image would newly join as an active, entity-scoped image.
    fn joined_entity(current: &Image, patch: &ImageMetadataPatch) -> Option<(EntityKind, Uuid)> {
        if !current.is_active {
            return None;
        }

        let image_type = patch.image_type.unwrap_or(current.image_type);
        let (kind, before, field) = match image_type {
            ImageType::Project => (EntityKind::Project, current.project_id, &patch.project_id),
            ImageType::Blog => (EntityKind::Blog, current.blog_id, &patch.blog_id),
            _ => return None,
        };
        let after = field.clone().into_update().unwrap_or(before)?;

        // Already counted when it was attached to the same entity.
        let counted = before == Some(after) && current.image_type == image_type;
        (!counted).then_some((kind, after))
    }

    async fn check_entity_limit(
        &self,
        current: &Image,
        patch: &ImageMetadataPatch,
    ) -> Result<(), UpdateImageError> {
        let Some((kind, entity_id)) = Self::joined_entity(current, patch) else {
            return Ok(());
        };

        let active = self
            .query
            .count_active_for_entity(kind, entity_id)
            .await
            .map_err(|e| UpdateImageError::RepositoryError(e.to_string()))?;
        // A row attached by id but typed otherwise is already in the count.
        let already_in = match kind {
            EntityKind::Project => current.project_id == Some(entity_id),
            EntityKind::Blog => current.blog_id == Some(entity_id),
            EntityKind::User => false,
        };
        let after_move = if already_in { active } else { active + 1 };

        if after_move > self.max_images_per_entity {
            let image_type = patch.image_type.unwrap_or(current.image_type);
            warn!(%entity_id, %image_type, active, "Per-entity image limit reached on update");
            return Err(UpdateImageError::LimitExceeded {
                image_type,
                max: self.max_images_per_entity,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R, Q> UpdateImageUseCase for UpdateImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    async fn execute(&self, command: UpdateImageCommand) -> Result<Image, UpdateImageError> {
        if !command.requester.is_admin {
            return Err(UpdateImageError::Forbidden);
        }

        let current = self
            .query
            .find_by_id(command.image_id)
            .await
            .map_err(|e| UpdateImageError::RepositoryError(e.to_string()))?
            .ok_or(UpdateImageError::NotFound)?;

        self.check_entity_limit(&current, &command.patch).await?;

        let image = self
            .repository
            .update_metadata(command.image_id, command.patch)
            .await
            .map_err(|e| match e {
                ImageRepositoryError::NotFound => UpdateImageError::NotFound,
                other => UpdateImageError::RepositoryError(other.to_string()),
            })?;

        info!(image_id = %image.id, image_type = %image.image_type, "Image metadata updated");
        Ok(image)
    }
}
