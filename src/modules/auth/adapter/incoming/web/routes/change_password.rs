use actix_web::{put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::use_cases::change_password::ChangePasswordError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChangePasswordResponse {
    pub message: String,
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "auth",
    security(("BearerAuth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = inline(SuccessResponse<ChangePasswordResponse>)),
        (status = 400, description = "Weak new password or wrong current password", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[put("/auth/change-password")]
pub async fn change_password_handler(
    user: AuthenticatedUser,
    req: web::Json<ChangePasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    match data
        .auth
        .change_password
        .execute(user.user_id, &dto.current_password, &dto.new_password)
        .await
    {
        Ok(()) => {
            info!(user_id = %user.user_id, "Password changed");
            ApiResponse::success(ChangePasswordResponse {
                message: "Password changed successfully".to_string(),
            })
        }
        Err(ChangePasswordError::IncorrectCurrentPassword) => {
            warn!(user_id = %user.user_id, "Password change with wrong current password");
            ApiResponse::bad_request("INVALID_CURRENT_PASSWORD", "Current password is incorrect")
        }
        Err(ChangePasswordError::WeakPassword(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(ChangePasswordError::NotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ChangePasswordError::HashingFailed(ref e))
        | Err(ChangePasswordError::RepositoryError(ref e)) => {
            error!(error = %e, "Password change failed");
            ApiResponse::internal_error_detailed(data.expose_error_details, e)
        }
    }
}
