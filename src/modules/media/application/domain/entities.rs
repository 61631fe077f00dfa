use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::shared::errors::InvalidValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Hero,
    About,
    Avatar,
    Project,
    Blog,
    General,
    Skill,
    Experience,
    Education,
}

impl ImageType {
    pub const ALL: [ImageType; 9] = [
        ImageType::Hero,
        ImageType::About,
        ImageType::Avatar,
        ImageType::Project,
        ImageType::Blog,
        ImageType::General,
        ImageType::Skill,
        ImageType::Experience,
        ImageType::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Hero => "hero",
            ImageType::About => "about",
            ImageType::Avatar => "avatar",
            ImageType::Project => "project",
            ImageType::Blog => "blog",
            ImageType::General => "general",
            ImageType::Skill => "skill",
            ImageType::Experience => "experience",
            ImageType::Education => "education",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InvalidValue> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| InvalidValue::new("image type", value))
    }

    /// Hero, about and avatar: one active image per owner, mirrored on the user row.
    pub fn is_profile(&self) -> bool {
        matches!(self, ImageType::Hero | ImageType::About | ImageType::Avatar)
    }

    /// Types whose uploads count against the per-entity cap.
    pub fn is_entity_scoped(&self) -> bool {
        matches!(self, ImageType::Project | ImageType::Blog)
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner kinds an image can be listed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Blog,
    User,
}

impl EntityKind {
    pub fn parse(value: &str) -> Result<Self, InvalidValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(EntityKind::Project),
            "blog" => Ok(EntityKind::Blog),
            "user" => Ok(EntityKind::User),
            _ => Err(InvalidValue::new("entity kind", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Image {
    pub id: Uuid,
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: i64,
    pub mime_type: String,
    pub image_type: ImageType,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub project_id: Option<Uuid>,
    pub blog_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageStats {
    pub total_active: u64,
    pub total_bytes: u64,
    pub by_type: BTreeMap<String, u64>,
}
