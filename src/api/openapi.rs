use crate::api::schemas::ErrorResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    ChangePasswordRequest, ChangePasswordResponse, CreateUserRequest, LoginRequestDto,
    LoginResponse, LoginUserInfo, PublicProfileResponse, RefreshTokenRequestDto,
    RefreshTokenResponseBody, RegisteredUser, UserProfileResponse,
};
use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::ProfilePatch;

// Images
use crate::media::adapter::incoming::web::routes::{
    DeletedImageResponse, ImageListResponse, OwnImagesResponse, UpdateImageRequest,
    UploadImageForm,
};
use crate::media::application::domain::entities::{EntityKind, Image, ImageStats, ImageType};

// Content
use crate::blog::adapter::incoming::web::routes::{
    BlogListResponse, BlogSearchResponse, CreateBlogRequest, UpdateBlogRequest,
};
use crate::blog::application::domain::BlogPost;
use crate::contact::adapter::incoming::web::routes::{
    ContactListResponse, ContactRequest, ContactSubmittedResponse,
};
use crate::contact::application::domain::{ContactMessage, ContactStats};
use crate::education::adapter::incoming::web::routes::{
    CreateEducationRequest, UpdateEducationRequest,
};
use crate::education::application::domain::Education;
use crate::experience::adapter::incoming::web::routes::{
    CreateExperienceRequest, UpdateExperienceRequest,
};
use crate::experience::application::domain::Experience;
use crate::project::adapter::incoming::web::routes::{CreateProjectRequest, UpdateProjectRequest};
use crate::project::application::domain::{Project, ProjectStatus};
use crate::skill::adapter::incoming::web::routes::{CreateSkillRequest, UpdateSkillRequest};
use crate::skill::application::domain::{Skill, SkillCategory};
use crate::shared::monthly::MonthlyCount;

// Portfolio
use crate::portfolio::application::domain::{
    BlogCard, BlogCounts, ContactCounts, MonthlyActivity, OverviewStatistics, OwnerCard,
    PortfolioOverview, PortfolioStats, ProjectCard, ProjectCounts, SkillCard, SkillCounts,
    Sitemap, SitemapEntry, TimelineCounts,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Backend for a personal portfolio: auth, image registry and site content"
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::get_user_profile_handler,
        crate::auth::adapter::incoming::web::routes::update_user_profile_handler,
        crate::auth::adapter::incoming::web::routes::change_password_handler,
        crate::auth::adapter::incoming::web::routes::get_public_profile_handler,

        // Image endpoints
        crate::media::adapter::incoming::web::routes::upload_image_handler,
        crate::media::adapter::incoming::web::routes::image_stats_handler,
        crate::media::adapter::incoming::web::routes::list_images_by_type_handler,
        crate::media::adapter::incoming::web::routes::list_images_by_entity_handler,
        crate::media::adapter::incoming::web::routes::list_own_images_handler,
        crate::media::adapter::incoming::web::routes::get_image_handler,
        crate::media::adapter::incoming::web::routes::update_image_handler,
        crate::media::adapter::incoming::web::routes::soft_delete_image_handler,
        crate::media::adapter::incoming::web::routes::hard_delete_image_handler,
        crate::media::adapter::incoming::web::routes::upload_profile_image_handler,
        crate::media::adapter::incoming::web::routes::delete_own_image_handler,

        // Project endpoints
        crate::project::adapter::incoming::web::routes::list_projects_handler,
        crate::project::adapter::incoming::web::routes::get_project_handler,
        crate::project::adapter::incoming::web::routes::create_project_handler,
        crate::project::adapter::incoming::web::routes::update_project_handler,
        crate::project::adapter::incoming::web::routes::delete_project_handler,

        // Skill endpoints
        crate::skill::adapter::incoming::web::routes::list_skills_handler,
        crate::skill::adapter::incoming::web::routes::skill_categories_handler,
        crate::skill::adapter::incoming::web::routes::get_skill_handler,
        crate::skill::adapter::incoming::web::routes::create_skill_handler,
        crate::skill::adapter::incoming::web::routes::update_skill_handler,
        crate::skill::adapter::incoming::web::routes::delete_skill_handler,

        // Experience endpoints
        crate::experience::adapter::incoming::web::routes::list_experience_handler,
        crate::experience::adapter::incoming::web::routes::get_experience_handler,
        crate::experience::adapter::incoming::web::routes::create_experience_handler,
        crate::experience::adapter::incoming::web::routes::update_experience_handler,
        crate::experience::adapter::incoming::web::routes::delete_experience_handler,

        // Education endpoints
        crate::education::adapter::incoming::web::routes::list_education_handler,
        crate::education::adapter::incoming::web::routes::get_education_handler,
        crate::education::adapter::incoming::web::routes::create_education_handler,
        crate::education::adapter::incoming::web::routes::update_education_handler,
        crate::education::adapter::incoming::web::routes::delete_education_handler,

        // Blog endpoints
        crate::blog::adapter::incoming::web::routes::list_blogs_handler,
        crate::blog::adapter::incoming::web::routes::blog_tags_handler,
        crate::blog::adapter::incoming::web::routes::search_blogs_handler,
        crate::blog::adapter::incoming::web::routes::get_blog_by_slug_handler,
        crate::blog::adapter::incoming::web::routes::create_blog_handler,
        crate::blog::adapter::incoming::web::routes::update_blog_handler,
        crate::blog::adapter::incoming::web::routes::delete_blog_handler,

        // Contact endpoints
        crate::contact::adapter::incoming::web::routes::submit_contact_handler,
        crate::contact::adapter::incoming::web::routes::list_contacts_handler,
        crate::contact::adapter::incoming::web::routes::contact_stats_handler,
        crate::contact::adapter::incoming::web::routes::get_contact_handler,
        crate::contact::adapter::incoming::web::routes::mark_contact_read_handler,
        crate::contact::adapter::incoming::web::routes::delete_contact_handler,

        // Portfolio endpoints
        crate::portfolio::adapter::incoming::web::routes::portfolio_overview_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolio_stats_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolio_sitemap_handler,
    ),
    components(
        schemas(
            ErrorResponse,

            // Auth DTOs
            CreateUserRequest,
            RegisteredUser,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            RefreshTokenRequestDto,
            RefreshTokenResponseBody,
            UserProfile,
            UserProfileResponse,
            PublicProfileResponse,
            ProfilePatch,
            ChangePasswordRequest,
            ChangePasswordResponse,

            // Images
            Image,
            ImageType,
            EntityKind,
            ImageStats,
            ImageListResponse,
            OwnImagesResponse,
            UploadImageForm,
            UpdateImageRequest,
            DeletedImageResponse,

            // Content
            Project,
            ProjectStatus,
            CreateProjectRequest,
            UpdateProjectRequest,
            Skill,
            SkillCategory,
            CreateSkillRequest,
            UpdateSkillRequest,
            Experience,
            CreateExperienceRequest,
            UpdateExperienceRequest,
            Education,
            CreateEducationRequest,
            UpdateEducationRequest,
            BlogPost,
            BlogListResponse,
            BlogSearchResponse,
            CreateBlogRequest,
            UpdateBlogRequest,
            ContactMessage,
            ContactRequest,
            ContactSubmittedResponse,
            ContactListResponse,
            ContactStats,
            MonthlyCount,

            // Portfolio
            PortfolioOverview,
            OwnerCard,
            OverviewStatistics,
            ProjectCard,
            SkillCard,
            BlogCard,
            PortfolioStats,
            ProjectCounts,
            SkillCounts,
            TimelineCounts,
            BlogCounts,
            ContactCounts,
            MonthlyActivity,
            Sitemap,
            SitemapEntry
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication and owner profile"),
        (name = "images", description = "Image uploads and registry"),
        (name = "projects", description = "Portfolio projects"),
        (name = "skills", description = "Skills"),
        (name = "experience", description = "Work experience"),
        (name = "education", description = "Education history"),
        (name = "blog", description = "Blog posts"),
        (name = "contact", description = "Contact form messages"),
        (name = "portfolio", description = "Aggregated views over all content"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/login",
            "/api/images/upload",
            "/api/projects",
            "/api/skills/{id}",
            "/api/experience",
            "/api/education/{id}",
            "/api/blog/{slug}",
            "/api/contact/{id}/read",
            "/api/contact/stats",
            "/api/skills/categories",
            "/api/auth/profile/upload/{image_type}",
            "/api/portfolio/overview",
            "/api/portfolio/stats",
            "/api/portfolio/sitemap",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
