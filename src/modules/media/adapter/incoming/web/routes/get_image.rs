use actix_web::{get, web, Responder, ResponseError};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::media::application::domain::entities::Image;
use crate::media::application::ports::incoming::use_cases::GetImageError;
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::AppState;

/// Active image by id
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    tag = "images",
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image", body = inline(SuccessResponse<Image>)),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No active image with that id", body = ErrorResponse),
    )
)]
#[get("/images/{id}")]
pub async fn get_image_handler(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let image_id = match parse_uuid(&path, "image id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match data.media.get.execute(image_id).await {
        Ok(image) => ApiResponse::success(image),
        Err(GetImageError::NotFound) => ApiResponse::not_found("IMAGE_NOT_FOUND", "Image not found"),
        Err(GetImageError::RepositoryError(e)) => {
            error!(error = %e, %image_id, "Fetching image failed");
            ApiResponse::internal_error_detailed(data.expose_error_details, &e)
        }
    }
}
