use uuid::Uuid;

use crate::shared::errors::AppError;

/// Parses a UUID path segment, reporting `label` on failure.
pub fn parse_uuid(raw: &str, label: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(format!("Invalid {label}")))
}
