use async_trait::async_trait;

use crate::auth::application::domain::entities::Requester;
use crate::media::application::domain::entities::ImageStats;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageStatsError {
    #[error("Admin privileges required")]
    Forbidden,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ImageStatsUseCase: Send + Sync {
    async fn execute(&self, requester: Requester) -> Result<ImageStats, ImageStatsError>;
}
