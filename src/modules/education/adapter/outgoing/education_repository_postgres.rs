use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use uuid::Uuid;

use super::sea_orm_entity::educations::{
    self, ActiveModel as EducationActiveModel, Entity as EducationEntity,
};
use crate::education::application::domain::{Education, EducationPatch, NewEducation};
use crate::shared::crud::{map_db_err, RecordRepository, RecordRepositoryError};

#[derive(Clone, Debug)]
pub struct EducationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl EducationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for EducationRepositoryPostgres {
    type Record = Education;
    type NewRecord = NewEducation;
    type Patch = EducationPatch;
    type Filter = ();

    async fn create(&self, new: NewEducation) -> Result<Education, RecordRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = EducationActiveModel {
            id: Set(Uuid::new_v4()),
            institution: Set(new.institution),
            degree: Set(new.degree),
            field_of_study: Set(new.field_of_study),
            description: Set(new.description),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            current: Set(new.current),
            gpa: Set(new.gpa),
            location: Set(new.location),
            institution_logo: Set(new.institution_logo),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Education>, RecordRepositoryError> {
        let row = EducationEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Education::from))
    }

    async fn list(&self, _filter: ()) -> Result<Vec<Education>, RecordRepositoryError> {
        let rows = EducationEntity::find()
            .order_by_desc(educations::Column::StartDate)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Education::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: EducationPatch,
    ) -> Result<Education, RecordRepositoryError> {
        let existing = EducationEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let mut model = existing.into_active_model();
        if let Some(institution) = patch.institution {
            model.institution = Set(institution);
        }
        if let Some(degree) = patch.degree {
            model.degree = Set(degree);
        }
        if let Some(field) = patch.field_of_study {
            model.field_of_study = Set(field);
        }
        if let Some(description) = patch.description.into_update() {
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
        if let Some(gpa) = patch.gpa.into_update() {
            model.gpa = Set(gpa);
        }
        if let Some(location) = patch.location.into_update() {
            model.location = Set(location);
        }
        if let Some(logo) = patch.institution_logo.into_update() {
            model.institution_logo = Set(logo);
        }
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = EducationEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }
}
