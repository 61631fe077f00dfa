use actix_multipart::Multipart;
use actix_web::{http::StatusCode, post, web, HttpResponse, Responder, ResponseError};
use futures::TryStreamExt;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::media::application::ports::incoming::use_cases::{UploadError, UploadImageCommand};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::AppState;

const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// Multipart form accepted by the upload endpoint (documentation only).
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// hero, about, avatar, project, blog, general, skill, experience or education
    #[schema(example = "project")]
    image_type: Option<String>,
    /// Project or blog the image belongs to
    entity_id: Option<String>,
    project_id: Option<String>,
    blog_id: Option<String>,
}

#[derive(Debug, Default)]
pub(super) struct UploadForm {
    pub(super) file_name: Option<String>,
    pub(super) bytes: Vec<u8>,
    image_type: Option<String>,
    entity_id: Option<String>,
    project_id: Option<String>,
    blog_id: Option<String>,
}

impl UploadForm {
    /// `entity_id` wins over the legacy per-kind fields.
    fn entity_id(&self) -> Option<&str> {
        [&self.entity_id, &self.project_id, &self.blog_id]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

fn file_too_large(max_bytes: u64) -> HttpResponse {
    ApiResponse::error(
        StatusCode::PAYLOAD_TOO_LARGE,
        "FILE_TOO_LARGE",
        &format!("File exceeds the maximum size of {max_bytes} bytes"),
    )
}

pub(super) async fn read_form(mut payload: Multipart, max_file_bytes: u64) -> Result<UploadForm, HttpResponse> {
    let mut form = UploadForm::default();
    let malformed = |e: actix_multipart::MultipartError| {
        warn!(error = %e, "Malformed multipart body");
        ApiResponse::bad_request("INVALID_MULTIPART", "Invalid multipart data")
    };

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        // `file` is what the profile upload form sends
        if name == "image" || name == "file" {
            if form.file_name.is_some() || !form.bytes.is_empty() {
                warn!("Multipart body carried more than one image part");
                return Err(ApiResponse::bad_request(
                    "VALIDATION_ERROR",
                    "Only one image file may be uploaded per request",
                ));
            }
            form.file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);

            while let Some(chunk) = field.try_next().await.map_err(malformed)? {
                if (form.bytes.len() + chunk.len()) as u64 > max_file_bytes {
                    return Err(file_too_large(max_file_bytes));
                }
                form.bytes.extend_from_slice(&chunk);
            }
            continue;
        }

        let mut value = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if value.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                return Err(ApiResponse::bad_request(
                    "VALIDATION_ERROR",
                    &format!("Field '{name}' is too long"),
                ));
            }
            value.extend_from_slice(&chunk);
        }
        let value = String::from_utf8_lossy(&value).into_owned();

        match name.as_str() {
            "image_type" => form.image_type = Some(value),
            "entity_id" => form.entity_id = Some(value),
            "project_id" => form.project_id = Some(value),
            "blog_id" => form.blog_id = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

pub(super) fn upload_error_response(err: UploadError, expose: bool) -> HttpResponse {
    match err {
        UploadError::InvalidFileType(name) => {
            warn!(file = %name, "Rejected upload with disallowed extension");
            ApiResponse::bad_request("INVALID_FILE_TYPE", "File type not allowed")
        }
        UploadError::FileTooLarge { max_bytes } => file_too_large(max_bytes),
        UploadError::LimitExceeded { image_type, max } => ApiResponse::bad_request(
            "LIMIT_EXCEEDED",
            &format!("Maximum {max} images allowed per {image_type}"),
        ),
        UploadError::Forbidden => ApiResponse::forbidden("FORBIDDEN", "Admin access required"),
        UploadError::StorageFailed(ref e) => {
            error!(error = %e, "Image storage failed");
            ApiResponse::error_with_details(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "Failed to store image",
                expose.then(|| e.clone()),
            )
        }
        UploadError::RepositoryError(ref e) => {
            error!(error = %e, "Recording uploaded image failed");
            ApiResponse::internal_error_detailed(expose, e)
        }
    }
}

/// Upload an image
#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "images",
    security(("BearerAuth" = [])),
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = inline(SuccessResponse<Image>)),
        (status = 400, description = "Invalid file, type or id, or per-entity limit reached", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
    )
)]
#[post("/images/upload")]
pub async fn upload_image_handler(
    admin: AdminUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let form = match read_form(payload, data.upload_max_bytes).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    let file_name = match form.file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return ApiResponse::bad_request("NO_FILE", "No image file provided"),
    };

    let image_type = match form.image_type.as_deref().map(str::trim) {
        None | Some("") => ImageType::General,
        Some(raw) => match ImageType::parse(raw) {
            Ok(t) => t,
            Err(e) => return ApiResponse::bad_request("INVALID_IMAGE_TYPE", &e.to_string()),
        },
    };

    let entity_id: Option<Uuid> = match form.entity_id().map(|raw| parse_uuid(raw, "entity id")) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => return e.error_response(),
    };

    let command = UploadImageCommand {
        requester: admin.requester(),
        original_filename: file_name,
        bytes: form.bytes,
        image_type,
        entity_id,
    };

    match data.media.upload.execute(command).await {
        Ok(image) => ApiResponse::created(image),
        Err(e) => upload_error_response(e, data.expose_error_details),
    }
}
