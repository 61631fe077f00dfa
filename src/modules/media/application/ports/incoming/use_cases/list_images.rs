use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{EntityKind, Image, ImageType};
use crate::media::application::ports::outgoing::ImageQueryError;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListImagesError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ImageQueryError> for ListImagesError {
    fn from(err: ImageQueryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait ListImagesUseCase: Send + Sync {
    async fn by_type(
        &self,
        image_type: ImageType,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ListImagesError>;

    async fn by_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ListImagesError>;

    async fn by_owner(&self, owner: UserId) -> Result<Vec<Image>, ListImagesError>;
}
