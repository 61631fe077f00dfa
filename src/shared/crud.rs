use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::shared::errors::AppError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordRepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RecordRepositoryError> for AppError {
    fn from(err: RecordRepositoryError) -> Self {
        match err {
            RecordRepositoryError::NotFound => AppError::NotFound("Record not found".to_string()),
            RecordRepositoryError::Conflict(msg) => AppError::Conflict(msg),
            RecordRepositoryError::DatabaseError(msg) => AppError::Unexpected(msg),
        }
    }
}

impl RecordRepositoryError {
    /// Same as the `From` conversion but names the missing record.
    pub fn describe(self, what: &str) -> AppError {
        match self {
            RecordRepositoryError::NotFound => AppError::NotFound(format!("{what} not found")),
            other => other.into(),
        }
    }
}

/// Create/read/update/delete contract shared by the portfolio content tables.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    type Record: Send;
    type NewRecord: Send;
    type Patch: Send;
    type Filter: Send;

    async fn create(&self, new: Self::NewRecord) -> Result<Self::Record, RecordRepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<Self::Record>, RecordRepositoryError>;

    async fn list(&self, filter: Self::Filter)
        -> Result<Vec<Self::Record>, RecordRepositoryError>;

    async fn update(
        &self,
        id: Uuid,
        patch: Self::Patch,
    ) -> Result<Self::Record, RecordRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError>;

    /// Same as [`RecordRepository::find`] but a missing row is an error.
    async fn get(&self, id: Uuid) -> Result<Self::Record, RecordRepositoryError> {
        self.find(id).await?.ok_or(RecordRepositoryError::NotFound)
    }
}

/// Maps sea-orm errors, recognising unique violations as conflicts.
pub fn map_db_err(e: sea_orm::DbErr) -> RecordRepositoryError {
    match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
            RecordRepositoryError::Conflict(msg)
        }
        _ => RecordRepositoryError::DatabaseError(e.to_string()),
    }
}

/// Reject blank required text at the boundary.
pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// `YYYY-MM-DD`, as sent by the admin frontend.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

/// String lists are stored as a JSON array in a text column.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored list is not a JSON string array");
        Vec::new()
    })
}

/// Trims entries and drops blanks and duplicates, keeping first-seen order.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_translate_to_app_errors() {
        assert!(matches!(
            AppError::from(RecordRepositoryError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RecordRepositoryError::Conflict("dup".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RecordRepositoryError::DatabaseError("down".into())),
            AppError::Unexpected(_)
        ));
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("name", "  Rust ").unwrap(), "Rust");
        assert!(matches!(
            require_text("name", "   "),
            Err(AppError::Validation(msg)) if msg == "name is required"
        ));
    }

    #[test]
    fn describe_names_the_missing_record() {
        assert!(matches!(
            RecordRepositoryError::NotFound.describe("Skill"),
            AppError::NotFound(msg) if msg == "Skill not found"
        ));
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date("start_date", "2023-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
        assert!(parse_date("start_date", "01/04/2023").is_err());
    }

    #[test]
    fn lists_survive_storage_and_tolerate_garbage() {
        let tags = clean_list(vec![" rust ".into(), "".into(), "rust".into(), "axum".into()]);
        assert_eq!(tags, vec!["rust", "axum"]);
        assert_eq!(decode_list(&encode_list(&tags)), tags);
        assert!(decode_list("not json").is_empty());
        assert!(decode_list("").is_empty());
    }
}
