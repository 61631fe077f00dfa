use sea_orm::entity::prelude::*;

use crate::auth::application::domain::entities::{User, UserId, UserProfile};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub whatsapp_url: Option<String>,
    pub website_url: Option<String>,
    pub email_url: Option<String>,
    pub hero_image_url: Option<String>,
    pub about_image_url: Option<String>,
    pub cv_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            self.updated_at = Set(Utc::now().into());
        }

        Ok(self)
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: UserId::from(model.id),
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            profile: UserProfile {
                first_name: model.first_name,
                last_name: model.last_name,
                bio: model.bio,
                title: model.title,
                location: model.location,
                phone: model.phone,
                avatar_url: model.avatar_url,
                github_url: model.github_url,
                linkedin_url: model.linkedin_url,
                twitter_url: model.twitter_url,
                instagram_url: model.instagram_url,
                whatsapp_url: model.whatsapp_url,
                website_url: model.website_url,
                email_url: model.email_url,
                hero_image_url: model.hero_image_url,
                about_image_url: model.about_image_url,
                cv_url: model.cv_url,
            },
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
