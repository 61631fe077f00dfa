use actix_web::{post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    pub username: String,

    #[schema(example = "alice@example.com")]
    pub email: String,

    #[schema(example = "pw123456")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = inline(SuccessResponse<RegisteredUser>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/register")]
pub async fn register_user_handler(
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    info!(username = %dto.username, "Registration attempt");

    let input = match CreateUserInput::new(&dto.username, &dto.email, &dto.password) {
        Ok(input) => input,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.register.execute(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            ApiResponse::created(RegisteredUser {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
                is_admin: user.is_admin,
                created_at: user.created_at,
            })
        }

        Err(CreateUserError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }

        Err(CreateUserError::UsernameAlreadyExists) => {
            warn!("Registration rejected: username taken");
            ApiResponse::conflict("USERNAME_EXISTS", "Username already exists")
        }

        Err(CreateUserError::EmailAlreadyExists) => {
            warn!("Registration rejected: email taken");
            ApiResponse::conflict("EMAIL_EXISTS", "Email already exists")
        }

        Err(CreateUserError::HashingFailed(ref e)) => {
            error!(error = %e, "Password hashing failed during registration");
            ApiResponse::internal_error_detailed(data.expose_error_details, e)
        }

        Err(CreateUserError::RepositoryError(ref e)) => {
            error!(error = %e, "Repository error during registration");
            ApiResponse::internal_error_detailed(data.expose_error_details, e)
        }
    }
}
