use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use uuid::Uuid;

use super::sea_orm_entity::experiences::{
    self, ActiveModel as ExperienceActiveModel, Entity as ExperienceEntity,
};
use crate::experience::application::domain::{Experience, ExperiencePatch, NewExperience};
use crate::shared::crud::{map_db_err, RecordRepository, RecordRepositoryError};

#[derive(Clone, Debug)]
pub struct ExperienceRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ExperienceRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for ExperienceRepositoryPostgres {
    type Record = Experience;
    type NewRecord = NewExperience;
    type Patch = ExperiencePatch;
    type Filter = ();

    async fn create(&self, new: NewExperience) -> Result<Experience, RecordRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = ExperienceActiveModel {
            id: Set(Uuid::new_v4()),
            company: Set(new.company),
            position: Set(new.position),
            description: Set(new.description),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            current: Set(new.current),
            location: Set(new.location),
            company_logo: Set(new.company_logo),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Experience>, RecordRepositoryError> {
        let row = ExperienceEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Experience::from))
    }

    async fn list(&self, _filter: ()) -> Result<Vec<Experience>, RecordRepositoryError> {
        let rows = ExperienceEntity::find()
            .order_by_desc(experiences::Column::StartDate)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Experience::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ExperiencePatch,
    ) -> Result<Experience, RecordRepositoryError> {
        let existing = ExperienceEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let mut model = existing.into_active_model();
        if let Some(company) = patch.company {
            model.company = Set(company);
        }
        if let Some(position) = patch.position {
            model.position = Set(position);
        }
        if let Some(description) = patch.description {
            model.description = Set(description);
        }
        if let Some(start_date) = patch.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date.into_update() {
            model.end_date = Set(end_date);
        }
        if let Some(current) = patch.current {
            model.current = Set(current);
        }
        if let Some(location) = patch.location.into_update() {
            model.location = Set(location);
        }
        if let Some(logo) = patch.company_logo.into_update() {
            model.company_logo = Set(logo);
        }
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = ExperienceEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }
}
