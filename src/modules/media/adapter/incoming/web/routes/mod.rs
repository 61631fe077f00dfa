mod delete_image;
mod get_image;
mod image_stats;
mod list_images;
mod profile_images;
mod update_image;
mod upload_image;

use actix_web::web;

pub use delete_image::*;
pub use get_image::*;
pub use image_stats::*;
pub use list_images::*;
pub use profile_images::*;
pub use update_image::*;
pub use upload_image::*;

/// Literal `/images/...` paths are registered before `/images/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_image_handler)
        .service(image_stats_handler)
        .service(list_images_by_type_handler)
        .service(list_images_by_entity_handler)
        .service(hard_delete_image_handler)
        .service(list_own_images_handler)
        .service(upload_profile_image_handler)
        .service(delete_own_image_handler)
        .service(get_image_handler)
        .service(update_image_handler)
        .service(soft_delete_image_handler);
}
