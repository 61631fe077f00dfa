use sea_orm::entity::prelude::*;

use crate::education::application::domain::Education;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "educations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub current: bool,
    pub gpa: Option<String>,
    pub location: Option<String>,
    pub institution_logo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Education {
    fn from(model: Model) -> Self {
        Education {
            id: model.id,
            institution: model.institution,
            degree: model.degree,
            field_of_study: model.field_of_study,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            current: model.current,
            gpa: model.gpa,
            location: model.location,
            institution_logo: model.institution_logo,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
