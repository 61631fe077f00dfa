use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::blog::application::domain::BlogFilter;
use crate::portfolio::application::domain::{
    build_overview, build_sitemap, build_stats, OverviewSources, PortfolioOverview,
    PortfolioStats, Sitemap, StatsSources, HIGHLIGHT_COUNT,
};
use crate::project::application::domain::ProjectFilter;
use crate::shared::api::ApiResponse;
use crate::shared::errors::AppError;
use crate::shared::monthly::window_start;
use crate::shared::pagination::PageRequest;
use crate::skill::application::domain::SkillFilter;
use crate::AppState;

const OVERVIEW_WINDOW_DAYS: i64 = 180;
const STATS_WINDOW_DAYS: i64 = 365;

/// Landing-page summary: owner profile, counts and highlights
#[utoipa::path(
    get,
    path = "/api/portfolio/overview",
    tag = "portfolio",
    responses(
        (status = 200, description = "Portfolio overview", body = inline(SuccessResponse<PortfolioOverview>)),
        (status = 404, description = "No portfolio owner yet", body = ErrorResponse),
    )
)]
#[get("/portfolio/overview")]
pub async fn portfolio_overview_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let owner = data.auth.public_profile.execute().await.map_err(|e| match e {
        FetchUserError::NotFound => AppError::NotFound("Portfolio owner not found".to_string()),
        FetchUserError::QueryError(msg) => {
            error!(error = %msg, "Loading the portfolio owner failed");
            AppError::Unexpected(msg)
        }
    })?;

    let content = &data.content;
    let since = window_start(Utc::now(), OVERVIEW_WINDOW_DAYS);
    let projects = content.projects.list(ProjectFilter::default()).await?;
    let skills = content.skills.list(SkillFilter::default()).await?;
    let experience = content.experience.list(()).await?;
    let education = content.education.list(()).await?;
    let recent_blogs = content
        .blog
        .list_page(
            BlogFilter {
                published: Some(true),
                tag: None,
            },
            PageRequest {
                page: 1,
                per_page: HIGHLIGHT_COUNT as u32,
            },
        )
        .await?;
    let blogs = content.blog.stats(since).await?;
    let contacts = content.contact.stats(since).await?;

    Ok(ApiResponse::success(build_overview(OverviewSources {
        owner: &owner,
        projects: &projects,
        skills: &skills,
        experience_count: experience.len() as u64,
        education_count: education.len() as u64,
        recent_blogs: &recent_blogs.items,
        blogs: &blogs,
        contacts: &contacts,
        since,
    })))
}

/// Detailed counts per content type plus twelve months of activity
#[utoipa::path(
    get,
    path = "/api/portfolio/stats",
    tag = "portfolio",
    responses(
        (status = 200, description = "Portfolio statistics", body = inline(SuccessResponse<PortfolioStats>)),
    )
)]
#[get("/portfolio/stats")]
pub async fn portfolio_stats_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let content = &data.content;
    let since = window_start(Utc::now(), STATS_WINDOW_DAYS);

    let projects = content.projects.list(ProjectFilter::default()).await?;
    let skills = content.skills.list(SkillFilter::default()).await?;
    let experience = content.experience.list(()).await?;
    let education = content.education.list(()).await?;

    Ok(ApiResponse::success(build_stats(StatsSources {
        projects: &projects,
        skills: &skills,
        experience: &experience,
        education: &education,
        blogs: content.blog.stats(since).await?,
        contacts: content.contact.stats(since).await?,
        since,
    })))
}

/// Public URLs for search engines
#[utoipa::path(
    get,
    path = "/api/portfolio/sitemap",
    tag = "portfolio",
    responses(
        (status = 200, description = "Sitemap entries", body = inline(SuccessResponse<Sitemap>)),
    )
)]
#[get("/portfolio/sitemap")]
pub async fn portfolio_sitemap_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let content = &data.content;
    let projects = content.projects.list(ProjectFilter::default()).await?;
    let blogs = content
        .blog
        .list(BlogFilter {
            published: Some(true),
            tag: None,
        })
        .await?;
    let skills = content.skills.list(SkillFilter::default()).await?;

    Ok(ApiResponse::success(build_sitemap(
        &projects,
        &blogs,
        &skills,
        Utc::now(),
    )))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(portfolio_overview_handler)
        .service(portfolio_stats_handler)
        .service(portfolio_sitemap_handler);
}
