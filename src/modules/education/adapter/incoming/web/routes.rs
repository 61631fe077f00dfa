use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::education::application::domain::{Education, EducationPatch, NewEducation};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::crud::{parse_date, require_text};
use crate::shared::errors::AppError;
use crate::shared::patch::PatchField;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEducationRequest {
    pub institution: String,
    #[schema(example = "BSc")]
    pub degree: String,
    #[schema(example = "Computer Science")]
    pub field_of_study: String,
    pub description: Option<String>,
    #[schema(example = "2016-09-01")]
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[schema(example = "3.8/4.0")]
    pub gpa: Option<String>,
    pub location: Option<String>,
    pub institution_logo: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEducationRequest {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: PatchField<String>,
    pub start_date: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub end_date: PatchField<String>,
    pub current: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub gpa: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub location: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub institution_logo: PatchField<String>,
}

impl TryFrom<CreateEducationRequest> for NewEducation {
    type Error = AppError;

    fn try_from(body: CreateEducationRequest) -> Result<Self, Self::Error> {
        Ok(NewEducation {
            institution: require_text("institution", &body.institution)?,
            degree: require_text("degree", &body.degree)?,
            field_of_study: require_text("field_of_study", &body.field_of_study)?,
            description: body.description,
            start_date: parse_date("start_date", &body.start_date)?,
            end_date: body
                .end_date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            current: body.current,
            gpa: body.gpa,
            location: body.location,
            institution_logo: body.institution_logo,
        })
    }
}

impl TryFrom<UpdateEducationRequest> for EducationPatch {
    type Error = AppError;

    fn try_from(body: UpdateEducationRequest) -> Result<Self, Self::Error> {
        let required = |field: &str, value: Option<String>| {
            value.as_deref().map(|v| require_text(field, v)).transpose()
        };

        Ok(EducationPatch {
            institution: required("institution", body.institution)?,
            degree: required("degree", body.degree)?,
            field_of_study: required("field_of_study", body.field_of_study)?,
            description: body.description,
            start_date: body
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: body.end_date.try_map(|d| parse_date("end_date", &d))?,
            current: body.current,
            gpa: body.gpa,
            location: body.location,
            institution_logo: body.institution_logo,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/education",
    tag = "education",
    responses(
        (status = 200, description = "Education, most recent first", body = inline(SuccessResponse<Vec<Education>>)),
    )
)]
#[get("/education")]
pub async fn list_education_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = data.content.education.list(()).await?;
    Ok(ApiResponse::success(entries))
}

#[utoipa::path(
    get,
    path = "/api/education/{id}",
    tag = "education",
    params(("id" = String, Path, description = "Education id")),
    responses(
        (status = 200, description = "Education entry", body = inline(SuccessResponse<Education>)),
        (status = 404, description = "Education not found", body = ErrorResponse),
    )
)]
#[get("/education/{id}")]
pub async fn get_education_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "education id")?;
    let entry = data
        .content
        .education
        .get(id)
        .await
        .map_err(|e| e.describe("Education"))?;
    Ok(ApiResponse::success(entry))
}

#[utoipa::path(
    post,
    path = "/api/education",
    tag = "education",
    security(("BearerAuth" = [])),
    request_body = CreateEducationRequest,
    responses(
        (status = 201, description = "Education created", body = inline(SuccessResponse<Education>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[post("/education")]
pub async fn create_education_handler(
    _admin: AdminUser,
    body: web::Json<CreateEducationRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new = NewEducation::try_from(body.into_inner())?;
    let entry = data.content.education.create(new).await?;

    info!(education_id = %entry.id, "Education created");
    Ok(ApiResponse::created(entry))
}

#[utoipa::path(
    put,
    path = "/api/education/{id}",
    tag = "education",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Education id")),
    request_body = UpdateEducationRequest,
    responses(
        (status = 200, description = "Education updated", body = inline(SuccessResponse<Education>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Education not found", body = ErrorResponse),
    )
)]
#[put("/education/{id}")]
pub async fn update_education_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateEducationRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "education id")?;
    let patch = EducationPatch::try_from(body.into_inner())?;
    let entry = data
        .content
        .education
        .update(id, patch)
        .await
        .map_err(|e| e.describe("Education"))?;
    Ok(ApiResponse::success(entry))
}

#[utoipa::path(
    delete,
    path = "/api/education/{id}",
    tag = "education",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Education id")),
    responses(
        (status = 204, description = "Education deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Education not found", body = ErrorResponse),
    )
)]
#[delete("/education/{id}")]
pub async fn delete_education_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "education id")?;
    data.content
        .education
        .delete(id)
        .await
        .map_err(|e| e.describe("Education"))?;

    info!(education_id = %id, "Education deleted");
    Ok(ApiResponse::no_content())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_education_handler)
        .service(create_education_handler)
        .service(get_education_handler)
        .service(update_education_handler)
        .service(delete_education_handler);
}
