use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::contact::application::domain::{
    ContactFilter, ContactMessage, ContactPatch, ContactStats, NewContactMessage,
};
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::errors::AppError;
use crate::shared::monthly::window_start;
use crate::shared::pagination::{PageQuery, PageResult};
use crate::AppState;

const MAX_CONTACTS_PER_PAGE: u32 = 100;
const STATS_WINDOW_DAYS: i64 = 180;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactSubmittedResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ContactListQuery {
    /// Only read (`true`) or unread (`false`) messages
    pub read: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactMessage>,
    pub total: u64,
    pub pages: u64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageResult<ContactMessage>> for ContactListResponse {
    fn from(page: PageResult<ContactMessage>) -> Self {
        Self {
            total: page.total,
            pages: page.pages(),
            page: page.page,
            per_page: page.per_page,
            contacts: page.items,
        }
    }
}

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = inline(SuccessResponse<ContactSubmittedResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
    )
)]
#[post("/contact")]
pub async fn submit_contact_handler(
    body: web::Json<ContactRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewContactMessage::validated(
        &body.name,
        &body.email,
        body.subject.as_deref(),
        &body.message,
    )?;

    let stored = data.content.contact.create(new).await?;
    info!(contact_id = %stored.id, "Contact message received");

    Ok(ApiResponse::created(ContactSubmittedResponse {
        message: "Message sent successfully".to_string(),
        id: stored.id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    security(("BearerAuth" = [])),
    params(ContactListQuery),
    responses(
        (status = 200, description = "Messages, newest first", body = inline(SuccessResponse<ContactListResponse>)),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[get("/contact")]
pub async fn list_contacts_handler(
    _admin: AdminUser,
    query: web::Query<ContactListQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .into_request(MAX_CONTACTS_PER_PAGE);

    let result = data
        .content
        .contact
        .list_page(ContactFilter { read: query.read }, page)
        .await?;
    Ok(ApiResponse::success(ContactListResponse::from(result)))
}

/// Inbox totals plus messages per month over the last six months
#[utoipa::path(
    get,
    path = "/api/contact/stats",
    tag = "contact",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Inbox statistics", body = inline(SuccessResponse<ContactStats>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[get("/contact/stats")]
pub async fn contact_stats_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let since = window_start(Utc::now(), STATS_WINDOW_DAYS);
    let stats = data.content.contact.stats(since).await?;
    Ok(ApiResponse::success(stats))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    tag = "contact",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Message", body = inline(SuccessResponse<ContactMessage>)),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
    )
)]
#[get("/contact/{id}")]
pub async fn get_contact_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "contact id")?;
    let message = data
        .content
        .contact
        .get(id)
        .await
        .map_err(|e| e.describe("Contact message"))?;
    Ok(ApiResponse::success(message))
}

#[utoipa::path(
    put,
    path = "/api/contact/{id}/read",
    tag = "contact",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Marked as read", body = inline(SuccessResponse<ContactMessage>)),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
    )
)]
#[put("/contact/{id}/read")]
pub async fn mark_contact_read_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "contact id")?;
    let message = data
        .content
        .contact
        .update(id, ContactPatch { read: Some(true) })
        .await
        .map_err(|e| e.describe("Contact message"))?;
    Ok(ApiResponse::success(message))
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    tag = "contact",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Contact message id")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
    )
)]
#[delete("/contact/{id}")]
pub async fn delete_contact_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_uuid(&path, "contact id")?;
    data.content
        .contact
        .delete(id)
        .await
        .map_err(|e| e.describe("Contact message"))?;

    info!(contact_id = %id, "Contact message deleted");
    Ok(ApiResponse::no_content())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_contact_handler)
        .service(list_contacts_handler)
        .service(contact_stats_handler)
        .service(get_contact_handler)
        .service(mark_contact_read_handler)
        .service(delete_contact_handler);
}
