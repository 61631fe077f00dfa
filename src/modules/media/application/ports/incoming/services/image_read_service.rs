use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Requester, UserId};
use crate::media::application::domain::entities::{EntityKind, Image, ImageStats, ImageType};
use crate::media::application::ports::incoming::use_cases::{
    GetImageError, GetImageUseCase, ImageStatsError, ImageStatsUseCase, ListImagesError,
    ListImagesUseCase,
};
use crate::media::application::ports::outgoing::ImageQuery;
use crate::shared::pagination::{PageRequest, PageResult};

pub struct ImageReadService<Q>
where
    Q: ImageQuery,
{
    query: Q,
}

impl<Q> ImageReadService<Q>
where
    Q: ImageQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetImageUseCase for ImageReadService<Q>
where
    Q: ImageQuery,
{
    async fn execute(&self, image_id: Uuid) -> Result<Image, GetImageError> {
        self.query
            .find_by_id(image_id)
            .await?
            .filter(|image| image.is_active)
            .ok_or(GetImageError::NotFound)
    }
}

#[async_trait]
impl<Q> ListImagesUseCase for ImageReadService<Q>
where
    Q: ImageQuery,
{
    async fn by_type(
        &self,
        image_type: ImageType,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ListImagesError> {
        Ok(self.query.list_by_type(image_type, page).await?)
    }

    async fn by_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ListImagesError> {
        Ok(self.query.list_by_entity(kind, entity_id, page).await?)
    }

    async fn by_owner(&self, owner: UserId) -> Result<Vec<Image>, ListImagesError> {
        Ok(self.query.list_by_owner(owner).await?)
    }
}

#[async_trait]
impl<Q> ImageStatsUseCase for ImageReadService<Q>
where
    Q: ImageQuery,
{
    async fn execute(&self, requester: Requester) -> Result<ImageStats, ImageStatsError> {
        if !requester.is_admin {
            return Err(ImageStatsError::Forbidden);
        }
        self.query
            .stats()
            .await
            .map_err(|e| ImageStatsError::RepositoryError(e.to_string()))
    }
}
