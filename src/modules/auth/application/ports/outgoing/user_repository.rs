use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::{User, UserId};
use crate::shared::patch::PatchField;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Profile update with PATCH semantics: omitted keeps, null clears, value replaces.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfilePatch {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub bio: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub location: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub avatar_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub github_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub linkedin_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub twitter_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub instagram_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub whatsapp_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub website_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub hero_image_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub about_image_url: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub cv_url: PatchField<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, UserRepositoryError>;

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;
}
