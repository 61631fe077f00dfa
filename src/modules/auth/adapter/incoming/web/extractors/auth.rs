use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::domain::entities::{Requester, UserId};
use crate::auth::application::ports::outgoing::{AuthError, TokenKind, TokenProvider};
use crate::auth::application::use_cases::authorize_admin::AuthorizeError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Caller holding a valid access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Authenticated caller whose account carries the admin flag.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub Requester);

impl AdminUser {
    pub fn requester(&self) -> Requester {
        self.0
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

pub fn auth_error_response(err: AuthError) -> HttpResponse {
    match err {
        AuthError::Missing => ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        ),
        AuthError::Malformed => ApiResponse::unauthorized("INVALID_TOKEN", "Invalid token"),
        AuthError::Expired => ApiResponse::unauthorized("TOKEN_EXPIRED", "Token has expired"),
        AuthError::WrongKind => {
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "Invalid token type")
        }
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_service = match req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        {
            Some(service) => service,
            None => {
                tracing::error!("Token provider is not registered as app data");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        match token_service.authenticate(bearer_token(req), TokenKind::Access) {
            Ok(user_id) => ready(Ok(AuthenticatedUser { user_id })),
            Err(e) => ready(Err(create_api_error(auth_error_response(e)))),
        }
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        // 401 is decided before any admin lookup happens
        let authenticated = AuthenticatedUser::from_request(req, payload).into_inner();
        let data = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let user = authenticated?;
            let data = data.ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

            match data.auth.authorize_admin.execute(user.user_id).await {
                Ok(requester) => Ok(AdminUser(requester)),
                Err(AuthorizeError::NotAdmin) | Err(AuthorizeError::UserNotFound) => Err(
                    create_api_error(ApiResponse::forbidden("FORBIDDEN", "Admin access required")),
                ),
                Err(AuthorizeError::QueryError(e)) => {
                    tracing::error!(error = %e, "Admin lookup failed");
                    Err(create_api_error(ApiResponse::internal_error()))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{
        expired_access_token, test_token_data, test_token_service,
    };
    use crate::tests::support::stubs::StubAuthorizeAdmin;
    use actix_web::{get, test, App, Responder};

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        ApiResponse::success(user.user_id)
    }

    #[get("/admin-only")]
    async fn admin_only(admin: AdminUser) -> impl Responder {
        ApiResponse::success(admin.requester().user_id)
    }

    #[actix_web::test]
    async fn access_token_authenticates() {
        let user_id = UserId::new();
        let token = test_token_service().issue_access(user_id).unwrap();

        let app = test::init_service(App::new().app_data(test_token_data()).service(whoami)).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], user_id.to_string());
    }

    #[actix_web::test]
    async fn missing_header_is_401() {
        let app = test::init_service(App::new().app_data(test_token_data()).service(whoami)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;

        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "MISSING_AUTH_HEADER");
    }

    #[actix_web::test]
    async fn refresh_token_is_wrong_kind_on_protected_route() {
        let token = test_token_service().issue_refresh(UserId::new()).unwrap();
        let app = test::init_service(App::new().app_data(test_token_data()).service(whoami)).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_TOKEN_TYPE");
    }

    #[actix_web::test]
    async fn expired_access_token_is_401_token_expired() {
        let token = expired_access_token(UserId::new());
        let app = test::init_service(App::new().app_data(test_token_data()).service(whoami)).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "TOKEN_EXPIRED");
    }

    #[actix_web::test]
    async fn expired_token_on_admin_route_is_401_before_admin_lookup() {
        let state = TestAppStateBuilder::default()
            .with_authorize_admin(StubAuthorizeAdmin::allowed())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(admin_only),
        )
        .await;

        let token = expired_access_token(UserId::new());
        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "TOKEN_EXPIRED");
    }

    #[actix_web::test]
    async fn admin_route_checks_authentication_first() {
        let state = TestAppStateBuilder::default()
            .with_authorize_admin(StubAuthorizeAdmin::denied())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(admin_only),
        )
        .await;

        let anonymous =
            test::call_service(&app, test::TestRequest::get().uri("/admin-only").to_request())
                .await;
        assert_eq!(anonymous.status(), 401);

        let token = test_token_service().issue_access(UserId::new()).unwrap();
        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn admin_route_admits_admin() {
        let state = TestAppStateBuilder::default()
            .with_authorize_admin(StubAuthorizeAdmin::allowed())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(admin_only),
        )
        .await;

        let user_id = UserId::new();
        let token = test_token_service().issue_access(user_id).unwrap();
        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], user_id.to_string());
    }
}
