use actix_multipart::Multipart;
use actix_web::{delete, post, web, HttpResponse, Responder, ResponseError};
use tracing::{error, info};

use super::delete_image::DeletedImageResponse;
use super::upload_image::{read_form, upload_error_response, UploadImageForm};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::Requester;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::media::application::ports::incoming::use_cases::{DeleteImageError, UploadImageCommand};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::AppState;

fn profile_type(raw: &str) -> Option<ImageType> {
    ImageType::parse(raw).ok().filter(ImageType::is_profile)
}

/// Upload the caller's own hero, about or avatar image
///
/// Replaces the previous active image of that type and updates the matching profile URL.
#[utoipa::path(
    post,
    path = "/api/auth/profile/upload/{image_type}",
    tag = "auth",
    security(("BearerAuth" = [])),
    params(("image_type" = String, Path, description = "hero, about or avatar")),
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = inline(SuccessResponse<Image>)),
        (status = 400, description = "Invalid image type or file", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
    )
)]
#[post("/auth/profile/upload/{image_type}")]
pub async fn upload_profile_image_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(image_type) = profile_type(&path) else {
        return ApiResponse::bad_request(
            "INVALID_IMAGE_TYPE",
            "Image type must be hero, about or avatar",
        );
    };

    let form = match read_form(payload, data.upload_max_bytes).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };
    let file_name = match form.file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return ApiResponse::bad_request("NO_FILE", "No image file provided"),
    };

    let command = UploadImageCommand {
        requester: Requester {
            user_id: user.user_id,
            is_admin: false,
        },
        original_filename: file_name,
        bytes: form.bytes,
        image_type,
        entity_id: None,
    };

    match data.media.upload.execute(command).await {
        Ok(image) => ApiResponse::created(image),
        Err(e) => upload_error_response(e, data.expose_error_details),
    }
}

/// Permanently delete one of the caller's own images
#[utoipa::path(
    delete,
    path = "/api/auth/profile/images/{id}",
    tag = "auth",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Row and file removed", body = inline(SuccessResponse<DeletedImageResponse>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "No image with that id belongs to the caller", body = ErrorResponse),
    )
)]
#[delete("/auth/profile/images/{id}")]
pub async fn delete_own_image_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let image_id = match parse_uuid(&path, "image id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match data.media.delete_own.execute(user.user_id, image_id).await {
        Ok(image) => {
            info!(image_id = %image.id, user_id = %user.user_id, "Profile image removed by owner");
            ApiResponse::success(DeletedImageResponse {
                message: "Image deleted successfully".into(),
                image_id: image.id.to_string(),
            })
        }
        Err(DeleteImageError::NotFound | DeleteImageError::Forbidden) => {
            ApiResponse::not_found("IMAGE_NOT_FOUND", "Image not found")
        }
        Err(DeleteImageError::RepositoryError(e)) => {
            error!(error = %e, "Deleting own image failed");
            ApiResponse::internal_error_detailed(data.expose_error_details, &e)
        }
    }
}
