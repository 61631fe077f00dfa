use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{EntityKind, Image, ImageStats, ImageType};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ImageQuery: Send + Sync {
    /// Active or not.
    async fn find_by_id(&self, image_id: Uuid) -> Result<Option<Image>, ImageQueryError>;

    async fn count_active_for_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, ImageQueryError>;

    /// Active images only, newest first.
    async fn list_by_type(
        &self,
        image_type: ImageType,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError>;

    /// Active images only, newest first.
    async fn list_by_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError>;

    /// Everything the user uploaded, inactive rows included.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Image>, ImageQueryError>;

    async fn stats(&self) -> Result<ImageStats, ImageQueryError>;
}
