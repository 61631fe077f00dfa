use actix_web::{delete, web, HttpResponse, Responder, ResponseError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::media::application::ports::incoming::use_cases::DeleteImageError;
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct DeletedImageResponse {
    pub message: String,
    pub image_id: String,
}

fn delete_error_response(err: DeleteImageError, expose: bool) -> HttpResponse {
    match err {
        DeleteImageError::NotFound => ApiResponse::not_found("IMAGE_NOT_FOUND", "Image not found"),
        DeleteImageError::Forbidden => ApiResponse::forbidden("FORBIDDEN", "Admin access required"),
        DeleteImageError::RepositoryError(ref e) => {
            error!(error = %e, "Deleting image failed");
            ApiResponse::internal_error_detailed(expose, e)
        }
    }
}

/// Soft-delete an image
///
/// The row is kept with `is_active = false`; the file is removed.
#[utoipa::path(
    delete,
    path = "/api/images/{id}",
    tag = "images",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image deactivated", body = inline(SuccessResponse<DeletedImageResponse>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "No active image with that id", body = ErrorResponse),
    )
)]
#[delete("/images/{id}")]
pub async fn soft_delete_image_handler(
    admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let image_id = match parse_uuid(&path, "image id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match data.media.soft_delete.execute(admin.requester(), image_id).await {
        Ok(image) => ApiResponse::success(DeletedImageResponse {
            message: "Image deleted successfully".into(),
            image_id: image.id.to_string(),
        }),
        Err(e) => delete_error_response(e, data.expose_error_details),
    }
}

/// Permanently delete an image
#[utoipa::path(
    delete,
    path = "/api/images/hard-delete/{id}",
    tag = "images",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Row and file removed", body = inline(SuccessResponse<DeletedImageResponse>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
#[delete("/images/hard-delete/{id}")]
pub async fn hard_delete_image_handler(
    admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let image_id = match parse_uuid(&path, "image id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match data.media.hard_delete.execute(admin.requester(), image_id).await {
        Ok(image) => ApiResponse::success(DeletedImageResponse {
            message: "Image permanently deleted".into(),
            image_id: image.id.to_string(),
        }),
        Err(e) => delete_error_response(e, data.expose_error_details),
    }
}
