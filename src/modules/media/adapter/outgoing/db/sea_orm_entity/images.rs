use sea_orm::entity::prelude::*;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{Image, ImageType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: i64,
    pub mime_type: String,
    pub image_type: ImageKind,
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub blog_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ImageKind {
    #[sea_orm(string_value = "hero")]
    Hero,
    #[sea_orm(string_value = "about")]
    About,
    #[sea_orm(string_value = "avatar")]
    Avatar,
    #[sea_orm(string_value = "project")]
    Project,
    #[sea_orm(string_value = "blog")]
    Blog,
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "skill")]
    Skill,
    #[sea_orm(string_value = "experience")]
    Experience,
    #[sea_orm(string_value = "education")]
    Education,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<crate::auth::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<ImageType> for ImageKind {
    fn from(value: ImageType) -> Self {
        match value {
            ImageType::Hero => ImageKind::Hero,
            ImageType::About => ImageKind::About,
            ImageType::Avatar => ImageKind::Avatar,
            ImageType::Project => ImageKind::Project,
            ImageType::Blog => ImageKind::Blog,
            ImageType::General => ImageKind::General,
            ImageType::Skill => ImageKind::Skill,
            ImageType::Experience => ImageKind::Experience,
            ImageType::Education => ImageKind::Education,
        }
    }
}

impl From<ImageKind> for ImageType {
    fn from(value: ImageKind) -> Self {
        match value {
            ImageKind::Hero => ImageType::Hero,
            ImageKind::About => ImageType::About,
            ImageKind::Avatar => ImageType::Avatar,
            ImageKind::Project => ImageType::Project,
            ImageKind::Blog => ImageType::Blog,
            ImageKind::General => ImageType::General,
            ImageKind::Skill => ImageType::Skill,
            ImageKind::Experience => ImageType::Experience,
            ImageKind::Education => ImageType::Education,
        }
    }
}

impl From<Model> for Image {
    fn from(model: Model) -> Self {
        Image {
            id: model.id,
            filename: model.filename,
            original_filename: model.original_filename,
            file_path: model.file_path,
            file_url: model.file_url,
            file_size: model.file_size,
            mime_type: model.mime_type,
            image_type: model.image_type.into(),
            user_id: UserId::from(model.user_id),
            project_id: model.project_id,
            blog_id: model.blog_id,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
