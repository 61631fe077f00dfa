use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::{ProfilePatch, UserRepository, UserRepositoryError};

const MAX_FIELD_LEN: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateUserError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, patch: ProfilePatch) -> Result<User, UpdateUserError>;
}

#[derive(Clone)]
pub struct UpdateProfileService<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> UpdateProfileService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

fn check_lengths(patch: &ProfilePatch) -> Result<(), UpdateUserError> {
    let fields = [
        ("first_name", &patch.first_name),
        ("last_name", &patch.last_name),
        ("bio", &patch.bio),
        ("title", &patch.title),
        ("location", &patch.location),
        ("phone", &patch.phone),
        ("avatar_url", &patch.avatar_url),
        ("github_url", &patch.github_url),
        ("linkedin_url", &patch.linkedin_url),
        ("twitter_url", &patch.twitter_url),
        ("instagram_url", &patch.instagram_url),
        ("whatsapp_url", &patch.whatsapp_url),
        ("website_url", &patch.website_url),
        ("email_url", &patch.email_url),
        ("hero_image_url", &patch.hero_image_url),
        ("about_image_url", &patch.about_image_url),
        ("cv_url", &patch.cv_url),
    ];

    for (name, field) in fields {
        if let Some(value) = field.as_value() {
            // bio is free text; the rest are short fields or URLs
            let limit = if name == "bio" { MAX_FIELD_LEN * 4 } else { MAX_FIELD_LEN };
            if value.chars().count() > limit {
                return Err(UpdateUserError::InvalidInput(format!(
                    "{name} must be at most {limit} characters"
                )));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl<R: UserRepository> UpdateUserProfileUseCase for UpdateProfileService<R> {
    async fn execute(&self, user_id: UserId, patch: ProfilePatch) -> Result<User, UpdateUserError> {
        check_lengths(&patch)?;

        self.repository
            .update_profile(user_id, patch)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateUserError::NotFound,
                other => UpdateUserError::RepositoryError(other.to_string()),
            })
    }
}
