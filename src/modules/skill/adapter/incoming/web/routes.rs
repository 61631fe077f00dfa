use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::crud::require_text;
use crate::shared::errors::AppError;
use crate::shared::patch::PatchField;
use crate::skill::application::domain::{NewSkill, Skill, SkillCategory, SkillFilter, SkillPatch};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SkillListQuery {
    /// language, framework, tool, design or other
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkillRequest {
    #[schema(example = "Rust")]
    pub name: String,
    #[schema(example = "language")]
    pub category: Option<String>,
    #[schema(example = "Advanced")]
    pub proficiency_level: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub proficiency_level: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub icon_url: PatchField<String>,
}

#[utoipa::path(
    get,
    path = "/api/skills",
    tag = "skills",
    params(SkillListQuery),
    responses(
        (status = 200, description = "Skills sorted by name", body = inline(SuccessResponse<Vec<Skill>>)),
        (status = 400, description = "Unknown category", body = ErrorResponse),
    )
)]
#[get("/skills")]
pub async fn list_skills_handler(
    query: web::Query<SkillListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = SkillFilter {
        category: query.category.as_deref().map(SkillCategory::parse).transpose()?,
    };
    let skills = data.content.skills.list(filter).await?;
    Ok(ApiResponse::success(skills))
}

#[utoipa::path(
    get,
    path = "/api/skills/categories",
    tag = "skills",
    responses(
        (status = 200, description = "Every skill category", body = inline(SuccessResponse<Vec<SkillCategory>>)),
    )
)]
#[get("/skills/categories")]
pub async fn skill_categories_handler() -> HttpResponse {
    ApiResponse::success(SkillCategory::ALL)
}

#[utoipa::path(
    get,
    path = "/api/skills/{id}",
    tag = "skills",
    params(("id" = String, Path, description = "Skill id")),
    responses(
        (status = 200, description = "Skill", body = inline(SuccessResponse<Skill>)),
        (status = 404, description = "Skill not found", body = ErrorResponse),
    )
)]
#[get("/skills/{id}")]
pub async fn get_skill_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "skill id")?;
    let skill = data.content.skills.get(id).await.map_err(|e| e.describe("Skill"))?;
    Ok(ApiResponse::success(skill))
}

#[utoipa::path(
    post,
    path = "/api/skills",
    tag = "skills",
    security(("BearerAuth" = [])),
    request_body = CreateSkillRequest,
    responses(
        (status = 201, description = "Skill created", body = inline(SuccessResponse<Skill>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
    )
)]
#[post("/skills")]
pub async fn create_skill_handler(
    _admin: AdminUser,
    body: web::Json<CreateSkillRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewSkill {
        name: require_text("name", &body.name)?,
        category: body
            .category
            .as_deref()
            .map(SkillCategory::parse)
            .transpose()?
            .unwrap_or_default(),
        proficiency_level: require_text("proficiency_level", &body.proficiency_level)?,
        icon_url: body.icon_url,
    };

    let skill = data.content.skills.create(new).await?;
    info!(skill_id = %skill.id, name = %skill.name, "Skill created");
    Ok(ApiResponse::created(skill))
}

#[utoipa::path(
    put,
    path = "/api/skills/{id}",
    tag = "skills",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Skill id")),
    request_body = UpdateSkillRequest,
    responses(
        (status = 200, description = "Skill updated", body = inline(SuccessResponse<Skill>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Skill not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
    )
)]
#[put("/skills/{id}")]
pub async fn update_skill_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateSkillRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "skill id")?;
    let body = body.into_inner();
    let patch = SkillPatch {
        name: body.name.as_deref().map(|n| require_text("name", n)).transpose()?,
        category: body.category.as_deref().map(SkillCategory::parse).transpose()?,
        proficiency_level: body
            .proficiency_level
            .as_deref()
            .map(|p| require_text("proficiency_level", p))
            .transpose()?,
        icon_url: body.icon_url,
    };

    let skill = data
        .content
        .skills
        .update(id, patch)
        .await
        .map_err(|e| e.describe("Skill"))?;
    Ok(ApiResponse::success(skill))
}

#[utoipa::path(
    delete,
    path = "/api/skills/{id}",
    tag = "skills",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Skill id")),
    responses(
        (status = 204, description = "Skill deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Skill not found", body = ErrorResponse),
    )
)]
#[delete("/skills/{id}")]
pub async fn delete_skill_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "skill id")?;
    data.content.skills.delete(id).await.map_err(|e| e.describe("Skill"))?;

    info!(skill_id = %id, "Skill deleted");
    Ok(ApiResponse::no_content())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_skills_handler)
        .service(create_skill_handler)
        .service(skill_categories_handler)
        .service(get_skill_handler)
        .service(update_skill_handler)
        .service(delete_skill_handler);
}
