use super::sea_orm_entity::users::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use crate::auth::application::domain::entities::{normalize_email, User, UserId};
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, ProfilePatch, UserRepository, UserRepositoryError,
};
use crate::shared::patch::PatchField;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, Set, SqlErr,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> UserRepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserRepositoryError::UserAlreadyExists,
        _ => UserRepositoryError::DatabaseError(e.to_string()),
    }
}

fn apply(target: &mut ActiveValue<Option<String>>, patch: PatchField<String>) {
    if let Some(value) = patch.into_update() {
        *target = Set(value);
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username.trim().to_string()),
            email: Set(normalize_email(&user.email)),
            password_hash: Set(user.password_hash),
            is_admin: Set(user.is_admin),
            first_name: Set(None),
            last_name: Set(None),
            bio: Set(None),
            title: Set(None),
            location: Set(None),
            phone: Set(None),
            avatar_url: Set(None),
            github_url: Set(None),
            linkedin_url: Set(None),
            twitter_url: Set(None),
            instagram_url: Set(None),
            whatsapp_url: Set(None),
            website_url: Set(None),
            email_url: Set(None),
            hero_image_url: Set(None),
            about_image_url: Set(None),
            cv_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, UserRepositoryError> {
        let existing = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        let mut model = existing.clone().into_active_model();
        apply(&mut model.first_name, patch.first_name);
        apply(&mut model.last_name, patch.last_name);
        apply(&mut model.bio, patch.bio);
        apply(&mut model.title, patch.title);
        apply(&mut model.location, patch.location);
        apply(&mut model.phone, patch.phone);
        apply(&mut model.avatar_url, patch.avatar_url);
        apply(&mut model.github_url, patch.github_url);
        apply(&mut model.linkedin_url, patch.linkedin_url);
        apply(&mut model.twitter_url, patch.twitter_url);
        apply(&mut model.instagram_url, patch.instagram_url);
        apply(&mut model.whatsapp_url, patch.whatsapp_url);
        apply(&mut model.website_url, patch.website_url);
        apply(&mut model.email_url, patch.email_url);
        apply(&mut model.hero_image_url, patch.hero_image_url);
        apply(&mut model.about_image_url, patch.about_image_url);
        apply(&mut model.cv_url, patch.cv_url);

        if !model.is_changed() {
            return Ok(existing.into());
        }

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(new_password_hash))
            .col_expr(
                users::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(users::Column::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }
}
