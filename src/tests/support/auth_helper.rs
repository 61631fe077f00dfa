use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{TokenClaims, TokenKind, TokenProvider};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only_0123456789";

pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: TEST_SECRET.to_string(),
        issuer: "portfolio-api".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    })
}

/// Token provider registered the way `main` registers it.
pub fn test_token_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    web::Data::new(Arc::new(test_token_service()) as Arc<dyn TokenProvider + Send + Sync>)
}

pub fn bearer_for(user_id: Uuid) -> (&'static str, String) {
    let token = test_token_service()
        .issue_access(UserId::from(user_id))
        .expect("issue access token");
    ("Authorization", format!("Bearer {token}"))
}

/// Bearer header for a random user; pair it with `StubAuthorizeAdmin::allowed()`.
pub fn admin_header() -> (&'static str, String) {
    bearer_for(Uuid::new_v4())
}

/// Access token signed with the test secret whose `exp` lies well past the verifier's leeway.
pub fn expired_access_token(user_id: UserId) -> String {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: user_id.value(),
        exp: now - 3600,
        iat: now - 7200,
        nbf: now - 7200,
        iss: "portfolio-api".to_string(),
        jti: Uuid::new_v4(),
        token_type: TokenKind::Access,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("sign expired token")
}
