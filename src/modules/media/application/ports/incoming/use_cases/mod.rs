mod delete_image;
mod image_stats;
mod list_images;
mod read_image;
mod update_image;
mod upload_image;

pub use delete_image::{
    DeleteImageError, DeleteOwnImageUseCase, HardDeleteImageUseCase, SoftDeleteImageUseCase,
};
pub use image_stats::{ImageStatsError, ImageStatsUseCase};
pub use list_images::{ListImagesError, ListImagesUseCase};
pub use read_image::{GetImageError, GetImageUseCase};
pub use update_image::{UpdateImageCommand, UpdateImageError, UpdateImageUseCase};
pub use upload_image::{UploadError, UploadImageCommand, UploadImageUseCase};
