use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "alice@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "pw123456")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token (short-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    /// JWT refresh token (long-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    refresh_token: String,

    user: LoginUserInfo,
}

#[derive(Serialize, ToSchema)]
pub struct LoginUserInfo {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "alice")]
    username: String,

    #[schema(example = "alice@example.com")]
    email: String,

    #[schema(example = true)]
    is_admin: bool,
}

/// User login
///
/// Authenticates with email and password, returns JWT access and refresh tokens.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    info!(email = %request.email(), "Login attempt");

    match data.auth.login.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in successfully");

            ApiResponse::success(LoginResponse {
                access_token: response.access_token,
                refresh_token: response.refresh_token,
                user: LoginUserInfo {
                    id: response.user.id.to_string(),
                    username: response.user.username,
                    email: response.user.email,
                    is_admin: response.user.is_admin,
                },
            })
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(e) => {
            error!(error = %e, "Login failed on the server side");
            ApiResponse::internal_error_detailed(data.expose_error_details, &e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::auth::application::use_cases::login_user::{
        ILoginUserUseCase, LoginUserResponse, UserInfo,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::load_test_env;
    use actix_web::{test, App};
    use async_trait::async_trait;

    fn create_mock_login_response() -> LoginUserResponse {
        LoginUserResponse {
            access_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.access".to_string(),
            refresh_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.refresh".to_string(),
            user: UserInfo {
                id: UserId::new(),
                username: "testuser".to_string(),
                email: "test@example.com".to_string(),
                is_admin: true,
            },
        }
    }

    #[derive(Clone)]
    struct MockLogin(Result<(), LoginError>);

    #[async_trait]
    impl ILoginUserUseCase for MockLogin {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
            self.0.clone().map(|_| create_mock_login_response())
        }
    }

    fn login_json() -> serde_json::Value {
        serde_json::json!({
            "email": "test@example.com",
            "password": "SecurePass123!"
        })
    }

    async fn post_login(
        mock: MockLogin,
        body: serde_json::Value,
    ) -> (actix_web::http::StatusCode, serde_json::Value) {
        let app_state = TestAppStateBuilder::default().with_login_user(mock).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(crate::shared::api::custom_json_config())
                .service(login_user_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_login_user_success() {
        load_test_env();
        let (status, body) = post_login(MockLogin(Ok(())), login_json()).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert!(body["data"]["access_token"].is_string());
        assert!(body["data"]["refresh_token"].is_string());
        assert_eq!(body["data"]["user"]["username"], "testuser");
        assert_eq!(body["data"]["user"]["is_admin"], true);
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn test_login_user_invalid_credentials() {
        let (status, body) =
            post_login(MockLogin(Err(LoginError::InvalidCredentials)), login_json()).await;

        assert_eq!(status, 401);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["error"], "Invalid email or password");
        assert!(body.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_login_server_failures_are_500() {
        let failures = [
            LoginError::PasswordVerificationFailed("argon2 task panicked".into()),
            LoginError::TokenGenerationFailed("JWT signing failed".into()),
            LoginError::QueryError("Connection pool exhausted".into()),
        ];

        for failure in failures {
            let (status, body) = post_login(MockLogin(Err(failure.clone())), login_json()).await;
            assert_eq!(status, 500, "{failure:?}");
            assert_eq!(body["code"], "INTERNAL_ERROR");
            assert_eq!(body["error"], "An unexpected error occurred");
        }
    }

    #[actix_web::test]
    async fn test_login_with_empty_password() {
        let (status, body) = post_login(
            MockLogin(Ok(())),
            serde_json::json!({ "email": "test@example.com", "password": "" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_login_with_missing_field() {
        let (status, body) = post_login(
            MockLogin(Ok(())),
            serde_json::json!({ "email": "test@example.com" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
