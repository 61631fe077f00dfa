use chrono::Utc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::sea_orm_entity::users;

pub fn user_model(id: Uuid, username: &str, is_admin: bool) -> users::Model {
    let now = Utc::now().fixed_offset();
    users::Model {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hashed".to_string(),
        is_admin,
        first_name: None,
        last_name: None,
        bio: None,
        title: None,
        location: None,
        phone: None,
        avatar_url: None,
        github_url: None,
        linkedin_url: None,
        twitter_url: None,
        instagram_url: None,
        whatsapp_url: None,
        website_url: None,
        email_url: None,
        hero_image_url: None,
        about_image_url: None,
        cv_url: None,
        created_at: now,
        updated_at: now,
    }
}
