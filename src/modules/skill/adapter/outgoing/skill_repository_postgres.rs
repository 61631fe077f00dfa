use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::sea_orm_entity::skills::{self, ActiveModel as SkillActiveModel, Entity as SkillEntity};
use crate::shared::crud::{map_db_err, RecordRepository, RecordRepositoryError};
use crate::skill::application::domain::{NewSkill, Skill, SkillFilter, SkillPatch};

#[derive(Clone, Debug)]
pub struct SkillRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SkillRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// The only unique column besides the key is `name`.
fn map_write_err(e: DbErr) -> RecordRepositoryError {
    match map_db_err(e) {
        RecordRepositoryError::Conflict(_) => {
            RecordRepositoryError::Conflict("Skill with this name already exists".to_string())
        }
        other => other,
    }
}

#[async_trait]
impl RecordRepository for SkillRepositoryPostgres {
    type Record = Skill;
    type NewRecord = NewSkill;
    type Patch = SkillPatch;
    type Filter = SkillFilter;

    async fn create(&self, new: NewSkill) -> Result<Skill, RecordRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = SkillActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            category: Set(new.category.into()),
            proficiency_level: Set(new.proficiency_level),
            icon_url: Set(new.icon_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_write_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Skill>, RecordRepositoryError> {
        let row = SkillEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Skill::from))
    }

    async fn list(&self, filter: SkillFilter) -> Result<Vec<Skill>, RecordRepositoryError> {
        let mut select = SkillEntity::find();
        if let Some(category) = filter.category {
            select = select.filter(skills::Column::Category.eq(skills::CategoryColumn::from(category)));
        }

        let rows = select
            .order_by_asc(skills::Column::Name)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn update(&self, id: Uuid, patch: SkillPatch) -> Result<Skill, RecordRepositoryError> {
        let existing = SkillEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let mut model = existing.into_active_model();
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(category) = patch.category {
            model.category = Set(category.into());
        }
        if let Some(level) = patch.proficiency_level {
            model.proficiency_level = Set(level);
        }
        if let Some(icon_url) = patch.icon_url.into_update() {
            model.icon_url = Set(icon_url);
        }
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&*self.db).await.map_err(map_write_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = SkillEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RecordRepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::application::domain::SkillCategory;
    use crate::tests::support::sqlite::memory_db;

    fn new_skill(name: &str, category: SkillCategory) -> NewSkill {
        NewSkill {
            name: name.to_string(),
            category,
            proficiency_level: "Advanced".into(),
            icon_url: None,
        }
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = SkillRepositoryPostgres::new(memory_db().await);
        repo.create(new_skill("Rust", SkillCategory::Language)).await.unwrap();

        let err = repo
            .create(new_skill("Rust", SkillCategory::Tool))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordRepositoryError::Conflict(ref m) if m.contains("already exists")));
    }

    #[tokio::test]
    async fn renaming_onto_another_skill_is_a_conflict() {
        let repo = SkillRepositoryPostgres::new(memory_db().await);
        repo.create(new_skill("Rust", SkillCategory::Language)).await.unwrap();
        let go = repo.create(new_skill("Go", SkillCategory::Language)).await.unwrap();

        let err = repo
            .update(
                go.id,
                SkillPatch {
                    name: Some("Rust".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordRepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_is_sorted_by_name_and_filters_category() {
        let repo = SkillRepositoryPostgres::new(memory_db().await);
        repo.create(new_skill("actix-web", SkillCategory::Framework)).await.unwrap();
        repo.create(new_skill("Rust", SkillCategory::Language)).await.unwrap();
        repo.create(new_skill("Go", SkillCategory::Language)).await.unwrap();

        let languages = repo
            .list(SkillFilter {
                category: Some(SkillCategory::Language),
            })
            .await
            .unwrap();
        let names: Vec<_> = languages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Go", "Rust"]);

        assert_eq!(repo.list(SkillFilter::default()).await.unwrap().len(), 3);
    }
}
