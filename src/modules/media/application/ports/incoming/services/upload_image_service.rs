use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::media::application::domain::entities::{EntityKind, Image, ImageType};
use crate::media::application::domain::file_names::{
    final_segment, generate_name, is_allowed_extension, mime_type_for,
};
use crate::media::application::domain::policies::upload_policy::UploadPolicy;
use crate::media::application::ports::incoming::use_cases::{
    UploadError, UploadImageCommand, UploadImageUseCase,
};
use crate::media::application::ports::outgoing::{
    ImageQuery, ImageRepository, ImageStorage, NewImage,
};

pub struct UploadImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    repository: R,
    query: Q,
    storage: Arc<dyn ImageStorage>,
    policy: UploadPolicy,
}

impl<R, Q> UploadImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    pub fn new(repository: R, query: Q, storage: Arc<dyn ImageStorage>, policy: UploadPolicy) -> Self {
        Self {
            repository,
            query,
            storage,
            policy,
        }
    }

    async fn check_entity_limit(
        &self,
        image_type: ImageType,
        entity_id: uuid::Uuid,
    ) -> Result<(), UploadError> {
        let kind = match image_type {
            ImageType::Project => EntityKind::Project,
            ImageType::Blog => EntityKind::Blog,
            _ => return Ok(()),
        };

        let active = self
            .query
            .count_active_for_entity(kind, entity_id)
            .await
            .map_err(|e| UploadError::RepositoryError(e.to_string()))?;

        if active >= self.policy.max_images_per_entity {
            warn!(%entity_id, %image_type, active, "Per-entity image limit reached");
            return Err(UploadError::LimitExceeded {
                image_type,
                max: self.policy.max_images_per_entity,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R, Q> UploadImageUseCase for UploadImageService<R, Q>
where
    R: ImageRepository,
    Q: ImageQuery,
{
    async fn execute(&self, command: UploadImageCommand) -> Result<Image, UploadError> {
        // Anyone signed in may replace their own hero, about or avatar image.
        if !command.requester.is_admin && !command.image_type.is_profile() {
            return Err(UploadError::Forbidden);
        }

        let original = final_segment(command.original_filename.trim()).to_string();
        if !is_allowed_extension(&original, command.image_type) {
            return Err(UploadError::InvalidFileType(original));
        }

        if command.bytes.len() as u64 > self.policy.max_file_size_bytes {
            return Err(UploadError::FileTooLarge {
                max_bytes: self.policy.max_file_size_bytes,
            });
        }

        let entity_id = command
            .entity_id
            .filter(|_| command.image_type.is_entity_scoped());
        if let Some(id) = entity_id {
            self.check_entity_limit(command.image_type, id).await?;
        }

        let file_name = generate_name(&original, command.image_type, entity_id);
        let stored = self
            .storage
            .store(&command.bytes, &file_name)
            .await
            .map_err(|e| UploadError::StorageFailed(e.to_string()))?;

        let new_image = NewImage {
            filename: stored.file_name.clone(),
            original_filename: original.clone(),
            file_path: stored.file_path.clone(),
            file_url: stored.file_url.clone(),
            file_size: stored.size as i64,
            mime_type: mime_type_for(&original).to_string(),
            image_type: command.image_type,
            user_id: command.requester.user_id,
            project_id: entity_id.filter(|_| command.image_type == ImageType::Project),
            blog_id: entity_id.filter(|_| command.image_type == ImageType::Blog),
        };

        match self.repository.record_image(new_image).await {
            Ok(image) => {
                info!(
                    image_id = %image.id,
                    image_type = %image.image_type,
                    size = image.file_size,
                    "Image uploaded"
                );
                Ok(image)
            }
            Err(e) => {
                if !self.storage.delete(&stored.file_path).await {
                    warn!(file = %stored.file_path, "Could not remove file after failed insert");
                }
                Err(UploadError::RepositoryError(e.to_string()))
            }
        }
    }
}
