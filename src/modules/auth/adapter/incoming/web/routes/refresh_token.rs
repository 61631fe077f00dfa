use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::{auth_error_response, bearer_token};
use crate::auth::application::ports::outgoing::AuthError;
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    /// Used when no `Authorization: Bearer` header is sent
    pub refresh_token: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshTokenResponseBody {
    pub access_token: String,
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body(content = RefreshTokenRequestDto, description = "Optional when the token is sent as a Bearer header"),
    responses(
        (status = 200, description = "New access token", body = inline(SuccessResponse<RefreshTokenResponseBody>)),
        (status = 401, description = "Missing, invalid, expired or wrong kind of token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/refresh")]
pub async fn refresh_token_handler(
    http: HttpRequest,
    body: Option<web::Json<RefreshTokenRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = bearer_token(&http)
        .map(str::to_string)
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token));

    let refresh_token = match token {
        Some(t) if !t.trim().is_empty() => t,
        _ => return auth_error_response(AuthError::Missing),
    };

    info!("Token refresh attempt");

    match data
        .auth
        .refresh
        .execute(RefreshTokenRequest { refresh_token })
        .await
    {
        Ok(response) => {
            info!("Token refreshed successfully");
            ApiResponse::success(RefreshTokenResponseBody {
                access_token: response.access_token,
            })
        }

        Err(RefreshTokenError::Rejected(reason)) => {
            warn!(reason = %reason, "Token refresh rejected");
            auth_error_response(reason)
        }

        Err(RefreshTokenError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed during refresh");
            ApiResponse::internal_error_detailed(data.expose_error_details, e)
        }
    }
}
