use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::sea_orm_entity::contacts::{self, ActiveModel as ContactActiveModel, Entity as ContactEntity};
use crate::contact::application::domain::{
    ContactFilter, ContactInbox, ContactMessage, ContactPatch, ContactStats, NewContactMessage,
};
use crate::shared::crud::{map_db_err, RecordRepository, RecordRepositoryError};
use crate::shared::monthly::bucket_by_month;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Clone, Debug)]
pub struct ContactRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ContactRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn filtered(filter: ContactFilter) -> Select<ContactEntity> {
    let mut select = ContactEntity::find();
    if let Some(read) = filter.read {
        select = select.filter(contacts::Column::Read.eq(read));
    }
    select.order_by_desc(contacts::Column::CreatedAt)
}

#[async_trait]
impl RecordRepository for ContactRepositoryPostgres {
    type Record = ContactMessage;
    type NewRecord = NewContactMessage;
    type Patch = ContactPatch;
    type Filter = ContactFilter;

    async fn create(&self, new: NewContactMessage) -> Result<ContactMessage, RecordRepositoryError> {
        let model = ContactActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            email: Set(new.email),
            subject: Set(new.subject),
            message: Set(new.message),
            read: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ContactMessage>, RecordRepositoryError> {
        let row = ContactEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(ContactMessage::from))
    }

    async fn list(&self, filter: ContactFilter) -> Result<Vec<ContactMessage>, RecordRepositoryError> {
        let rows = filtered(filter).all(&*self.db).await.map_err(map_db_err)?;
        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<ContactMessage, RecordRepositoryError> {
        let existing = ContactEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let Some(read) = patch.read else {
            return Ok(existing.into());
        };
        let mut model = existing.into_active_model();
        model.read = Set(read);

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = ContactEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ContactInbox for ContactRepositoryPostgres {
    async fn list_page(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> Result<PageResult<ContactMessage>, RecordRepositoryError> {
        let select = filtered(filter);
        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;
        let rows = select
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: rows.into_iter().map(ContactMessage::from).collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn stats(&self, since: DateTime<Utc>) -> Result<ContactStats, RecordRepositoryError> {
        let total = ContactEntity::find()
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;
        let read = ContactEntity::find()
            .filter(contacts::Column::Read.eq(true))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        let received: Vec<DateTimeWithTimeZone> = ContactEntity::find()
            .select_only()
            .column(contacts::Column::CreatedAt)
            .filter(contacts::Column::CreatedAt.gte(since.fixed_offset()))
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(ContactStats {
            total_messages: total,
            unread_messages: total.saturating_sub(read),
            read_messages: read,
            monthly_stats: bucket_by_month(received.into_iter().map(|ts| ts.with_timezone(&Utc))),
        })
    }
}
