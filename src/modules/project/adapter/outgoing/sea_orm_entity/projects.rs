use sea_orm::entity::prelude::*;

use crate::project::application::domain::{Project, ProjectStatus};
use crate::shared::crud::decode_list;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub status: StatusColumn,
    pub featured: bool,
    /// JSON array of technology names
    #[sea_orm(column_type = "Text")]
    pub technologies: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum StatusColumn {
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "planned")]
    Planned,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<ProjectStatus> for StatusColumn {
    fn from(value: ProjectStatus) -> Self {
        match value {
            ProjectStatus::Completed => StatusColumn::Completed,
            ProjectStatus::InProgress => StatusColumn::InProgress,
            ProjectStatus::Planned => StatusColumn::Planned,
        }
    }
}

impl From<StatusColumn> for ProjectStatus {
    fn from(value: StatusColumn) -> Self {
        match value {
            StatusColumn::Completed => ProjectStatus::Completed,
            StatusColumn::InProgress => ProjectStatus::InProgress,
            StatusColumn::Planned => ProjectStatus::Planned,
        }
    }
}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Project {
            id: model.id,
            title: model.title,
            description: model.description,
            short_description: model.short_description,
            image_url: model.image_url,
            github_url: model.github_url,
            live_url: model.live_url,
            status: model.status.into(),
            featured: model.featured,
            technologies: decode_list(&model.technologies),
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
