use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{AdminUser, AuthenticatedUser};
use crate::auth::application::use_cases::authorize_admin::AuthorizeError;
use crate::blog::application::domain::{unique_slug, BlogFilter, BlogPatch, BlogPost, NewBlogPost};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::crud::{clean_list, require_text};
use crate::shared::errors::AppError;
use crate::shared::pagination::{PageQuery, PageResult};
use crate::shared::patch::PatchField;
use crate::AppState;

const DEFAULT_POSTS_PER_PAGE: u32 = 10;
const MAX_POSTS_PER_PAGE: u32 = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub struct BlogListQuery {
    /// `true` (default), `false` for drafts or `all`; anything but `true` needs an admin token
    pub published: Option<String>,
    /// Only posts carrying this tag
    pub tag: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BlogSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogPost>,
    pub total: u64,
    pub pages: u64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageResult<BlogPost>> for BlogListResponse {
    fn from(page: PageResult<BlogPost>) -> Self {
        Self {
            total: page.total,
            pages: page.pages(),
            page: page.page,
            per_page: page.per_page,
            blogs: page.items,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogSearchResponse {
    pub blogs: Vec<BlogPost>,
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Hello, World")]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub featured_image: PatchField<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

fn parse_published(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some("all") => Ok(None),
        Some(other) => Err(AppError::Validation(format!(
            "Invalid published filter: '{other}'"
        ))),
    }
}

/// Drafts are only listed for admins.
async fn require_admin(user: Option<AuthenticatedUser>, data: &AppState) -> Result<(), AppError> {
    let user = user.ok_or_else(|| {
        AppError::Authentication("Authentication required to list drafts".to_string())
    })?;

    match data.auth.authorize_admin.execute(user.user_id).await {
        Ok(_) => Ok(()),
        Err(AuthorizeError::NotAdmin) | Err(AuthorizeError::UserNotFound) => {
            Err(AppError::Authorization("Admin access required".to_string()))
        }
        Err(AuthorizeError::QueryError(e)) => Err(AppError::Unexpected(e)),
    }
}

/// List blog posts
#[utoipa::path(
    get,
    path = "/api/blog",
    tag = "blog",
    params(BlogListQuery),
    responses(
        (status = 200, description = "One page of posts", body = inline(SuccessResponse<BlogListResponse>)),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 401, description = "Drafts requested without a token", body = ErrorResponse),
        (status = 403, description = "Drafts requested by a non-admin", body = ErrorResponse),
    )
)]
#[get("/blog")]
pub async fn list_blogs_handler(
    user: Option<AuthenticatedUser>,
    query: web::Query<BlogListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let published = parse_published(query.published.as_deref())?;
    if published != Some(true) {
        require_admin(user, &data).await?;
    }

    let page = PageQuery {
        page: query.page,
        per_page: query.per_page.or(Some(DEFAULT_POSTS_PER_PAGE)),
    }
    .into_request(MAX_POSTS_PER_PAGE);
    let filter = BlogFilter {
        published,
        tag: query.tag,
    };

    let result = data.content.blog.list_page(filter, page).await?;
    Ok(ApiResponse::success(BlogListResponse::from(result)))
}

/// Read a published post; counts as a view
#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = inline(SuccessResponse<BlogPost>)),
        (status = 404, description = "No published post with this slug", body = ErrorResponse),
    )
)]
#[get("/blog/{slug}")]
pub async fn get_blog_by_slug_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = data
        .content
        .blog
        .view_published(&path)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;
    Ok(ApiResponse::success(post))
}

#[utoipa::path(
    get,
    path = "/api/blog/tags",
    tag = "blog",
    responses(
        (status = 200, description = "Tags used by published posts", body = inline(SuccessResponse<Vec<String>>)),
    )
)]
#[get("/blog/tags")]
pub async fn blog_tags_handler(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tags = data.content.blog.published_tags().await?;
    Ok(ApiResponse::success(tags))
}

#[utoipa::path(
    get,
    path = "/api/blog/search",
    tag = "blog",
    params(BlogSearchQuery),
    responses(
        (status = 200, description = "Matching published posts", body = inline(SuccessResponse<BlogSearchResponse>)),
        (status = 400, description = "Empty query", body = ErrorResponse),
    )
)]
#[get("/blog/search")]
pub async fn search_blogs_handler(
    query: web::Query<BlogSearchQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Search query is required".to_string()))?;

    let blogs = data.content.blog.search(q).await?;
    Ok(ApiResponse::success(BlogSearchResponse {
        blogs,
        query: q.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/blog",
    tag = "blog",
    security(("BearerAuth" = [])),
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Post created", body = inline(SuccessResponse<BlogPost>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[post("/blog")]
pub async fn create_blog_handler(
    admin: AdminUser,
    body: web::Json<CreateBlogRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let title = require_text("title", &body.title)?;
    let content = require_text("content", &body.content)?;
    let slug = unique_slug(data.content.blog.as_ref(), &title, None).await?;

    let post = data
        .content
        .blog
        .create(NewBlogPost {
            title,
            slug,
            content,
            excerpt: body.excerpt.trim().to_string(),
            featured_image: body.featured_image,
            author_id: admin.requester().user_id.value(),
            published: body.published,
            tags: clean_list(body.tags),
        })
        .await?;

    info!(blog_id = %post.id, slug = %post.slug, published = post.published, "Blog post created");
    Ok(ApiResponse::created(post))
}

#[utoipa::path(
    put,
    path = "/api/blog/id/{id}",
    tag = "blog",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Post updated", body = inline(SuccessResponse<BlogPost>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
#[put("/blog/id/{id}")]
pub async fn update_blog_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateBlogRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "blog id")?;
    let body = body.into_inner();
    let existing = data
        .content
        .blog
        .get(id)
        .await
        .map_err(|e| e.describe("Blog post"))?;

    let title = body.title.as_deref().map(|t| require_text("title", t)).transpose()?;
    let slug = match title.as_deref() {
        Some(new_title) if new_title != existing.title => {
            Some(unique_slug(data.content.blog.as_ref(), new_title, Some(id)).await?)
        }
        _ => None,
    };

    let patch = BlogPatch {
        title,
        slug,
        content: body.content.as_deref().map(|c| require_text("content", c)).transpose()?,
        excerpt: body.excerpt.map(|e| e.trim().to_string()),
        featured_image: body.featured_image,
        published: body.published,
        tags: body.tags.map(clean_list),
    };

    let post = data
        .content
        .blog
        .update(id, patch)
        .await
        .map_err(|e| e.describe("Blog post"))?;
    Ok(ApiResponse::success(post))
}

#[utoipa::path(
    delete,
    path = "/api/blog/id/{id}",
    tag = "blog",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
#[delete("/blog/id/{id}")]
pub async fn delete_blog_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "blog id")?;
    data.content
        .blog
        .delete(id)
        .await
        .map_err(|e| e.describe("Blog post"))?;

    info!(blog_id = %id, "Blog post deleted");
    Ok(ApiResponse::no_content())
}

/// `/blog/tags` and `/blog/search` are registered ahead of `/blog/{slug}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_blogs_handler)
        .service(create_blog_handler)
        .service(blog_tags_handler)
        .service(search_blogs_handler)
        .service(update_blog_handler)
        .service(delete_blog_handler)
        .service(get_blog_by_slug_handler);
}
