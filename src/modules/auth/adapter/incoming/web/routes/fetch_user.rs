use actix_web::{get, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::{User, UserProfile};
use crate::auth::application::use_cases::fetch_profile::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct UserProfileResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            profile: user.profile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// What visitors of the portfolio see: no account email, no admin flag.
#[derive(Serialize, ToSchema)]
pub struct PublicProfileResponse {
    pub username: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

fn fetch_error_response(err: FetchUserError, expose: bool) -> actix_web::HttpResponse {
    match err {
        FetchUserError::NotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        FetchUserError::QueryError(ref e) => {
            error!(error = %e, "Database error fetching user profile");
            ApiResponse::internal_error_detailed(expose, e)
        }
    }
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
    )
)]
#[get("/auth/profile")]
pub async fn get_user_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.fetch_profile.execute(user.user_id).await {
        Ok(profile) => ApiResponse::success(UserProfileResponse::from(profile)),
        Err(e) => fetch_error_response(e, data.expose_error_details),
    }
}

/// Portfolio owner's public profile
#[utoipa::path(
    get,
    path = "/api/auth/public-profile",
    tag = "auth",
    responses(
        (status = 200, description = "Public profile", body = inline(SuccessResponse<PublicProfileResponse>)),
        (status = 404, description = "No user registered yet", body = ErrorResponse),
    )
)]
#[get("/auth/public-profile")]
pub async fn get_public_profile_handler(data: web::Data<AppState>) -> impl Responder {
    match data.auth.public_profile.execute().await {
        Ok(owner) => ApiResponse::success(PublicProfileResponse {
            username: owner.username,
            profile: owner.profile,
        }),
        Err(e) => fetch_error_response(e, data.expose_error_details),
    }
}
