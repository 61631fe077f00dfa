use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::experience::application::domain::{Experience, ExperiencePatch, NewExperience};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::crud::{parse_date, require_text};
use crate::shared::errors::AppError;
use crate::shared::patch::PatchField;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExperienceRequest {
    pub company: String,
    pub position: String,
    pub description: String,
    #[schema(example = "2022-03-01")]
    pub start_date: String,
    #[schema(example = "2024-01-31")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateExperienceRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub end_date: PatchField<String>,
    pub current: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub location: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub company_logo: PatchField<String>,
}

impl TryFrom<CreateExperienceRequest> for NewExperience {
    type Error = AppError;

    fn try_from(body: CreateExperienceRequest) -> Result<Self, Self::Error> {
        Ok(NewExperience {
            company: require_text("company", &body.company)?,
            position: require_text("position", &body.position)?,
            description: require_text("description", &body.description)?,
            start_date: parse_date("start_date", &body.start_date)?,
            end_date: body
                .end_date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            current: body.current,
            location: body.location,
            company_logo: body.company_logo,
        })
    }
}

impl TryFrom<UpdateExperienceRequest> for ExperiencePatch {
    type Error = AppError;

    fn try_from(body: UpdateExperienceRequest) -> Result<Self, Self::Error> {
        let required = |field: &str, value: Option<String>| {
            value.as_deref().map(|v| require_text(field, v)).transpose()
        };

        Ok(ExperiencePatch {
            company: required("company", body.company)?,
            position: required("position", body.position)?,
            description: required("description", body.description)?,
            start_date: body
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: body.end_date.try_map(|d| parse_date("end_date", &d))?,
            current: body.current,
            location: body.location,
            company_logo: body.company_logo,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/experience",
    tag = "experience",
    responses(
        (status = 200, description = "Experience, most recent first", body = inline(SuccessResponse<Vec<Experience>>)),
    )
)]
#[get("/experience")]
pub async fn list_experience_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = data.content.experience.list(()).await?;
    Ok(ApiResponse::success(entries))
}

#[utoipa::path(
    get,
    path = "/api/experience/{id}",
    tag = "experience",
    params(("id" = String, Path, description = "Experience id")),
    responses(
        (status = 200, description = "Experience entry", body = inline(SuccessResponse<Experience>)),
        (status = 404, description = "Experience not found", body = ErrorResponse),
    )
)]
#[get("/experience/{id}")]
pub async fn get_experience_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "experience id")?;
    let entry = data
        .content
        .experience
        .get(id)
        .await
        .map_err(|e| e.describe("Experience"))?;
    Ok(ApiResponse::success(entry))
}

#[utoipa::path(
    post,
    path = "/api/experience",
    tag = "experience",
    security(("BearerAuth" = [])),
    request_body = CreateExperienceRequest,
    responses(
        (status = 201, description = "Experience created", body = inline(SuccessResponse<Experience>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[post("/experience")]
pub async fn create_experience_handler(
    _admin: AdminUser,
    body: web::Json<CreateExperienceRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new = NewExperience::try_from(body.into_inner())?;
    let entry = data.content.experience.create(new).await?;

    info!(experience_id = %entry.id, "Experience created");
    Ok(ApiResponse::created(entry))
}

#[utoipa::path(
    put,
    path = "/api/experience/{id}",
    tag = "experience",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Experience id")),
    request_body = UpdateExperienceRequest,
    responses(
        (status = 200, description = "Experience updated", body = inline(SuccessResponse<Experience>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Experience not found", body = ErrorResponse),
    )
)]
#[put("/experience/{id}")]
pub async fn update_experience_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateExperienceRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "experience id")?;
    let patch = ExperiencePatch::try_from(body.into_inner())?;
    let entry = data
        .content
        .experience
        .update(id, patch)
        .await
        .map_err(|e| e.describe("Experience"))?;
    Ok(ApiResponse::success(entry))
}

#[utoipa::path(
    delete,
    path = "/api/experience/{id}",
    tag = "experience",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Experience id")),
    responses(
        (status = 204, description = "Experience deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Experience not found", body = ErrorResponse),
    )
)]
#[delete("/experience/{id}")]
pub async fn delete_experience_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "experience id")?;
    data.content
        .experience
        .delete(id)
        .await
        .map_err(|e| e.describe("Experience"))?;

    info!(experience_id = %id, "Experience deleted");
    Ok(ApiResponse::no_content())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_experience_handler)
        .service(create_experience_handler)
        .service(get_experience_handler)
        .service(update_experience_handler)
        .service(delete_experience_handler);
}
