use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::crud::RecordRepository;
use crate::shared::patch::PatchField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExperience {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: PatchField<NaiveDate>,
    pub current: Option<bool>,
    pub location: PatchField<String>,
    pub company_logo: PatchField<String>,
}

pub type ExperienceRepository = dyn RecordRepository<
    Record = Experience,
    NewRecord = NewExperience,
    Patch = ExperiencePatch,
    Filter = (),
>;
