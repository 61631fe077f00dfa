use sea_orm::entity::prelude::*;

use crate::skill::application::domain::{Skill, SkillCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub category: CategoryColumn,
    pub proficiency_level: String,
    pub icon_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CategoryColumn {
    #[sea_orm(string_value = "language")]
    Language,
    #[sea_orm(string_value = "framework")]
    Framework,
    #[sea_orm(string_value = "tool")]
    Tool,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<SkillCategory> for CategoryColumn {
    fn from(value: SkillCategory) -> Self {
        match value {
            SkillCategory::Language => CategoryColumn::Language,
            SkillCategory::Framework => CategoryColumn::Framework,
            SkillCategory::Tool => CategoryColumn::Tool,
            SkillCategory::Design => CategoryColumn::Design,
            SkillCategory::Other => CategoryColumn::Other,
        }
    }
}

impl From<CategoryColumn> for SkillCategory {
    fn from(value: CategoryColumn) -> Self {
        match value {
            CategoryColumn::Language => SkillCategory::Language,
            CategoryColumn::Framework => SkillCategory::Framework,
            CategoryColumn::Tool => SkillCategory::Tool,
            CategoryColumn::Design => SkillCategory::Design,
            CategoryColumn::Other => SkillCategory::Other,
        }
    }
}

impl From<Model> for Skill {
    fn from(model: Model) -> Self {
        Skill {
            id: model.id,
            name: model.name,
            category: model.category.into(),
            proficiency_level: model.proficiency_level,
            icon_url: model.icon_url,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
