use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::project::application::domain::{
    NewProject, Project, ProjectFilter, ProjectPatch, ProjectStatus,
};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::crud::{clean_list, require_text};
use crate::shared::errors::AppError;
use crate::shared::patch::PatchField;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProjectListQuery {
    /// completed, in-progress or planned
    pub status: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    #[schema(example = "Portfolio CMS")]
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[schema(example = "in-progress")]
    pub status: Option<String>,
    pub featured: Option<bool>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub short_description: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub image_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub github_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub live_url: PatchField<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub technologies: Option<Vec<String>>,
}

impl TryFrom<CreateProjectRequest> for NewProject {
    type Error = AppError;

    fn try_from(body: CreateProjectRequest) -> Result<Self, Self::Error> {
        Ok(NewProject {
            title: require_text("title", &body.title)?,
            description: require_text("description", &body.description)?,
            short_description: body.short_description,
            image_url: body.image_url,
            github_url: body.github_url,
            live_url: body.live_url,
            status: body
                .status
                .as_deref()
                .map(ProjectStatus::parse)
                .transpose()?
                .unwrap_or_default(),
            featured: body.featured.unwrap_or(false),
            technologies: clean_list(body.technologies),
        })
    }
}

impl TryFrom<UpdateProjectRequest> for ProjectPatch {
    type Error = AppError;

    fn try_from(body: UpdateProjectRequest) -> Result<Self, Self::Error> {
        Ok(ProjectPatch {
            title: body.title.as_deref().map(|t| require_text("title", t)).transpose()?,
            description: body
                .description
                .as_deref()
                .map(|d| require_text("description", d))
                .transpose()?,
            short_description: body.short_description,
            image_url: body.image_url,
            github_url: body.github_url,
            live_url: body.live_url,
            status: body.status.as_deref().map(ProjectStatus::parse).transpose()?,
            featured: body.featured,
            technologies: body.technologies.map(clean_list),
        })
    }
}

/// List projects, featured first
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects", body = inline(SuccessResponse<Vec<Project>>)),
        (status = 400, description = "Unknown status", body = ErrorResponse),
    )
)]
#[get("/projects")]
pub async fn list_projects_handler(
    query: web::Query<ProjectListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = ProjectFilter {
        status: query.status.as_deref().map(ProjectStatus::parse).transpose()?,
        featured: query.featured,
    };

    let projects = data.content.projects.list(filter).await?;
    Ok(ApiResponse::success(projects))
}

/// Fetch one project
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = inline(SuccessResponse<Project>)),
        (status = 404, description = "Project not found", body = ErrorResponse),
    )
)]
#[get("/projects/{id}")]
pub async fn get_project_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "project id")?;
    let project = data
        .content
        .projects
        .get(id)
        .await
        .map_err(|e| e.describe("Project"))?;
    Ok(ApiResponse::success(project))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    security(("BearerAuth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = inline(SuccessResponse<Project>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[post("/projects")]
pub async fn create_project_handler(
    _admin: AdminUser,
    body: web::Json<CreateProjectRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new = NewProject::try_from(body.into_inner())?;
    let project = data.content.projects.create(new).await?;

    info!(project_id = %project.id, "Project created");
    Ok(ApiResponse::created(project))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "projects",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = inline(SuccessResponse<Project>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    )
)]
#[put("/projects/{id}")]
pub async fn update_project_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateProjectRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "project id")?;
    let patch = ProjectPatch::try_from(body.into_inner())?;
    let project = data
        .content
        .projects
        .update(id, patch)
        .await
        .map_err(|e| e.describe("Project"))?;
    Ok(ApiResponse::success(project))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "projects",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    )
)]
#[delete("/projects/{id}")]
pub async fn delete_project_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "project id")?;
    data.content
        .projects
        .delete(id)
        .await
        .map_err(|e| e.describe("Project"))?;

    info!(project_id = %id, "Project deleted");
    Ok(ApiResponse::no_content())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_projects_handler)
        .service(create_project_handler)
        .service(get_project_handler)
        .service(update_project_handler)
        .service(delete_project_handler);
}
