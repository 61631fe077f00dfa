use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::crud::RecordRepository;
use crate::shared::patch::PatchField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    /// Kept as entered, e.g. "3.8/4.0"
    pub gpa: Option<String>,
    pub location: Option<String>,
    pub institution_logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEducation {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub gpa: Option<String>,
    pub location: Option<String>,
    pub institution_logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub description: PatchField<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: PatchField<NaiveDate>,
    pub current: Option<bool>,
    pub gpa: PatchField<String>,
    pub location: PatchField<String>,
    pub institution_logo: PatchField<String>,
}

pub type EducationRepository = dyn RecordRepository<
    Record = Education,
    NewRecord = NewEducation,
    Patch = EducationPatch,
    Filter = (),
>;
