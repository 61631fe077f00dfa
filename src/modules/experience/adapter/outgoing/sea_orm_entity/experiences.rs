use sea_orm::entity::prelude::*;

use crate::experience::application::domain::Experience;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "experiences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub current: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Experience {
    fn from(model: Model) -> Self {
        Experience {
            id: model.id,
            company: model.company,
            position: model.position,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            current: model.current,
            location: model.location,
            company_logo: model.company_logo,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}
