use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::sea_orm_entity::projects::{self, ActiveModel as ProjectActiveModel, Entity as ProjectEntity};
use crate::project::application::domain::{NewProject, Project, ProjectFilter, ProjectPatch};
use crate::shared::crud::{encode_list, map_db_err, RecordRepository, RecordRepositoryError};

#[derive(Clone, Debug)]
pub struct ProjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for ProjectRepositoryPostgres {
    type Record = Project;
    type NewRecord = NewProject;
    type Patch = ProjectPatch;
    type Filter = ProjectFilter;

    async fn create(&self, new: NewProject) -> Result<Project, RecordRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = ProjectActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            short_description: Set(new.short_description),
            image_url: Set(new.image_url),
            github_url: Set(new.github_url),
            live_url: Set(new.live_url),
            status: Set(new.status.into()),
            featured: Set(new.featured),
            technologies: Set(encode_list(&new.technologies)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Project>, RecordRepositoryError> {
        let row = ProjectEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Project::from))
    }

    async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>, RecordRepositoryError> {
        let mut select = ProjectEntity::find();
        if let Some(status) = filter.status {
            select = select.filter(projects::Column::Status.eq(projects::StatusColumn::from(status)));
        }
        if let Some(featured) = filter.featured {
            select = select.filter(projects::Column::Featured.eq(featured));
        }

        let rows = select
            .order_by_desc(projects::Column::Featured)
            .order_by_desc(projects::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, RecordRepositoryError> {
        let existing = ProjectEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let mut model = existing.into_active_model();
        if let Some(title) = patch.title {
            model.title = Set(title);
        }
        if let Some(description) = patch.description {
            model.description = Set(description);
        }
        if let Some(value) = patch.short_description.into_update() {
            model.short_description = Set(value);
        }
        if let Some(value) = patch.image_url.into_update() {
            model.image_url = Set(value);
        }
        if let Some(value) = patch.github_url.into_update() {
            model.github_url = Set(value);
        }
        if let Some(value) = patch.live_url.into_update() {
            model.live_url = Set(value);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.into());
        }
        if let Some(featured) = patch.featured {
            model.featured = Set(featured);
        }
        if let Some(technologies) = patch.technologies {
            model.technologies = Set(encode_list(&technologies));
        }
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = ProjectEntity::delete_by_id(id)
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
    use crate::project::application::domain::ProjectStatus;
    use crate::shared::patch::PatchField;
    use crate::tests::support::sqlite::memory_db;

    fn new_project(title: &str, status: ProjectStatus, featured: bool) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: format!("{title} description"),
            short_description: None,
            image_url: None,
            github_url: Some("https://github.com/example/repo".into()),
            live_url: None,
            status,
            featured,
            technologies: vec!["Rust".into(), "PostgreSQL".into()],
        }
    }

    #[tokio::test]
    async fn create_then_find_keeps_technologies() {
        let repo = ProjectRepositoryPostgres::new(memory_db().await);

        let created = repo
            .create(new_project("CMS", ProjectStatus::InProgress, false))
            .await
            .unwrap();
        let found = repo.find(created.id).await.unwrap().unwrap();

        assert_eq!(found.technologies, vec!["Rust", "PostgreSQL"]);
        assert_eq!(found.status, ProjectStatus::InProgress);
    }

    #[tokio::test]
    async fn list_filters_and_puts_featured_first() {
        let repo = ProjectRepositoryPostgres::new(memory_db().await);
        repo.create(new_project("A", ProjectStatus::Completed, false)).await.unwrap();
        repo.create(new_project("B", ProjectStatus::Completed, true)).await.unwrap();
        repo.create(new_project("C", ProjectStatus::Planned, false)).await.unwrap();

        let all = repo.list(ProjectFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "B");

        let completed = repo
            .list(ProjectFilter {
                status: Some(ProjectStatus::Completed),
                featured: None,
            })
            .await
            .unwrap();
        assert_eq!(completed.len(), 2);

        let featured = repo
            .list(ProjectFilter {
                status: None,
                featured: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = ProjectRepositoryPostgres::new(memory_db().await);
        let created = repo
            .create(new_project("CMS", ProjectStatus::Planned, false))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                ProjectPatch {
                    status: Some(ProjectStatus::Completed),
                    github_url: PatchField::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "CMS");
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.github_url, None);
        assert_eq!(updated.technologies.len(), 2);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let repo = ProjectRepositoryPostgres::new(memory_db().await);

        assert!(matches!(
            repo.update(Uuid::new_v4(), ProjectPatch::default()).await,
            Err(RecordRepositoryError::NotFound)
        ));
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RecordRepositoryError::NotFound)
        ));
    }
}
