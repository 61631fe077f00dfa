use actix_web::{put, web, Responder};
use tracing::{error, info};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::adapter::incoming::web::routes::fetch_user::UserProfileResponse;
use crate::auth::application::ports::outgoing::ProfilePatch;
use crate::auth::application::use_cases::update_profile::UpdateUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Update the current user's profile
///
/// Omitted fields are left alone, `null` clears a field.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "auth",
    security(("BearerAuth" = [])),
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 400, description = "Invalid field value", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
    )
)]
#[put("/auth/profile")]
pub async fn update_user_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<ProfilePatch>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .update_profile
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(updated) => {
            info!(user_id = %updated.id, "Profile updated");
            ApiResponse::success(UserProfileResponse::from(updated))
        }
        Err(UpdateUserError::NotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdateUserError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(UpdateUserError::RepositoryError(ref e)) => {
            error!(error = %e, "Profile update failed");
            ApiResponse::internal_error_detailed(data.expose_error_details, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{User, UserId};
    use crate::auth::application::ports::outgoing::TokenProvider;
    use crate::auth::application::use_cases::update_profile::UpdateUserProfileUseCase;
    use crate::shared::patch::PatchField;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{test_token_data, test_token_service};
    use crate::tests::support::fixtures::user_model;
    use actix_web::{test, App};
    use async_trait::async_trait;

    /// Applies only the `title` field so the test can see what the handler forwarded.
    struct EchoTitle;

    #[async_trait]
    impl UpdateUserProfileUseCase for EchoTitle {
        async fn execute(&self, user_id: UserId, patch: ProfilePatch) -> Result<User, UpdateUserError> {
            let mut user: User = user_model(user_id.value(), "alice", true).into();
            user.profile.title = match patch.title {
                PatchField::Value(v) => Some(v),
                PatchField::Null => None,
                PatchField::Unset => Some("unchanged".into()),
            };
            Ok(user)
        }
    }

    async fn put_profile(body: serde_json::Value) -> serde_json::Value {
        let state = TestAppStateBuilder::default()
            .with_update_user_profile(EchoTitle)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(update_user_profile_handler),
        )
        .await;

        let token = test_token_service().issue_access(UserId::new()).unwrap();
        let req = test::TestRequest::put()
            .uri("/auth/profile")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn value_null_and_omitted_reach_use_case_distinctly() {
        let set = put_profile(serde_json::json!({ "title": "Engineer" })).await;
        assert_eq!(set["data"]["title"], "Engineer");

        let cleared = put_profile(serde_json::json!({ "title": null })).await;
        assert!(cleared["data"]["title"].is_null());

        let untouched = put_profile(serde_json::json!({ "bio": "hi" })).await;
        assert_eq!(untouched["data"]["title"], "unchanged");
    }
}
