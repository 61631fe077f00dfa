use std::sync::Arc;

use crate::media::application::ports::incoming::use_cases::{
    DeleteOwnImageUseCase, GetImageUseCase, HardDeleteImageUseCase, ImageStatsUseCase,
    ListImagesUseCase, SoftDeleteImageUseCase, UpdateImageUseCase, UploadImageUseCase,
};

#[derive(Clone)]
pub struct MediaUseCases {
    pub upload: Arc<dyn UploadImageUseCase>,
    pub get: Arc<dyn GetImageUseCase>,
    pub list: Arc<dyn ListImagesUseCase>,
    pub soft_delete: Arc<dyn SoftDeleteImageUseCase>,
    pub hard_delete: Arc<dyn HardDeleteImageUseCase>,
    pub delete_own: Arc<dyn DeleteOwnImageUseCase>,
    pub update: Arc<dyn UpdateImageUseCase>,
    pub stats: Arc<dyn ImageStatsUseCase>,
}
