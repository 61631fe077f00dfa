mod delete_image_service;
mod image_read_service;
mod update_image_service;
mod upload_image_service;

pub use delete_image_service::DeleteImageService;
pub use image_read_service::ImageReadService;
pub use update_image_service::UpdateImageService;
pub use upload_image_service::UploadImageService;
