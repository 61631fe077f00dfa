use async_trait::async_trait;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::crud::{RecordRepository, RecordRepositoryError};
use crate::shared::errors::AppError;
use crate::shared::monthly::MonthlyCount;
use crate::shared::pagination::{PageRequest, PageResult};

pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;
pub const MESSAGE_LENGTH: std::ops::RangeInclusive<usize> = 10..=2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    /// Trims every field and checks lengths in characters, not bytes.
    pub fn validated(
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<Self, AppError> {
        let name = name.trim();
        let email = email.trim();
        let message = message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::Validation(
                "Name, email, and message are required".to_string(),
            ));
        }
        if !EmailAddress::is_valid(email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }
        if !NAME_LENGTH.contains(&name.chars().count()) {
            return Err(AppError::Validation(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !MESSAGE_LENGTH.contains(&message.chars().count()) {
            return Err(AppError::Validation(
                "Message must be between 10 and 2000 characters".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            message: message.to_string(),
        })
    }
}

/// Only the read flag changes after submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPatch {
    pub read: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFilter {
    pub read: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactStats {
    pub total_messages: u64,
    pub unread_messages: u64,
    pub read_messages: u64,
    /// Messages received per month since the requested cut-off
    pub monthly_stats: Vec<MonthlyCount>,
}

/// Inbox of contact-form submissions, newest first.
#[async_trait]
pub trait ContactInbox:
    RecordRepository<
    Record = ContactMessage,
    NewRecord = NewContactMessage,
    Patch = ContactPatch,
    Filter = ContactFilter,
>
{
    async fn list_page(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> Result<PageResult<ContactMessage>, RecordRepositoryError>;

    async fn stats(&self, since: DateTime<Utc>) -> Result<ContactStats, RecordRepositoryError>;
}

pub type ContactRepository = dyn ContactInbox;
