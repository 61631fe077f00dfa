use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::crud::RecordRepository;
use crate::shared::errors::InvalidValue;
use crate::shared::patch::PatchField;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Language,
    Framework,
    Tool,
    Design,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Language,
        SkillCategory::Framework,
        SkillCategory::Tool,
        SkillCategory::Design,
        SkillCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Language => "language",
            SkillCategory::Framework => "framework",
            SkillCategory::Tool => "tool",
            SkillCategory::Design => "design",
            SkillCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InvalidValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "language" => Ok(SkillCategory::Language),
            "framework" => Ok(SkillCategory::Framework),
            "tool" => Ok(SkillCategory::Tool),
            "design" => Ok(SkillCategory::Design),
            "other" => Ok(SkillCategory::Other),
            _ => Err(InvalidValue::new("skill category", value)),
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    /// Free text such as "Advanced" or "90"
    pub proficiency_level: String,
    pub icon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency_level: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub proficiency_level: Option<String>,
    pub icon_url: PatchField<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SkillFilter {
    pub category: Option<SkillCategory>,
}

pub type SkillRepository =
    dyn RecordRepository<Record = Skill, NewRecord = NewSkill, Patch = SkillPatch, Filter = SkillFilter>;
