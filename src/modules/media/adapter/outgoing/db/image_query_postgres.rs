use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use super::sea_orm_entity::images::{self, Entity as ImageEntity};
use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{EntityKind, Image, ImageStats, ImageType};
use crate::media::application::ports::outgoing::{ImageQuery, ImageQueryError};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Clone, Debug)]
pub struct ImageQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ImageQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn page(
        &self,
        select: Select<ImageEntity>,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError> {
        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;
        let rows = select
            .order_by_desc(images::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: rows.into_iter().map(Image::from).collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }
}

fn map_db_err(e: DbErr) -> ImageQueryError {
    ImageQueryError::DatabaseError(e.to_string())
}

fn entity_column(kind: EntityKind) -> images::Column {
    match kind {
        EntityKind::Project => images::Column::ProjectId,
        EntityKind::Blog => images::Column::BlogId,
        EntityKind::User => images::Column::UserId,
    }
}

fn active() -> Select<ImageEntity> {
    ImageEntity::find().filter(images::Column::IsActive.eq(true))
}

#[async_trait]
impl ImageQuery for ImageQueryPostgres {
    async fn find_by_id(&self, image_id: Uuid) -> Result<Option<Image>, ImageQueryError> {
        let row = ImageEntity::find_by_id(image_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Image::from))
    }

    async fn count_active_for_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, ImageQueryError> {
        active()
            .filter(entity_column(kind).eq(entity_id))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list_by_type(
        &self,
        image_type: ImageType,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError> {
        let select = active().filter(images::Column::ImageType.eq(images::ImageKind::from(image_type)));
        self.page(select, page).await
    }

    async fn list_by_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError> {
        let select = active().filter(entity_column(kind).eq(entity_id));
        self.page(select, page).await
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Image>, ImageQueryError> {
        let rows = ImageEntity::find()
            .filter(images::Column::UserId.eq(owner.value()))
            .order_by_desc(images::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Image::from).collect())
    }

    async fn stats(&self) -> Result<ImageStats, ImageQueryError> {
        // SUM over BIGINT is NUMERIC on Postgres
        let rows: Vec<(images::ImageKind, i64, Option<i64>)> = active()
            .select_only()
            .column(images::Column::ImageType)
            .column_as(Expr::col(images::Column::Id).count(), "image_count")
            .column_as(
                Expr::col(images::Column::FileSize)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total_bytes",
            )
            .group_by(images::Column::ImageType)
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut stats = ImageStats::default();
        for (kind, count, bytes) in rows {
            let image_type: ImageType = kind.into();
            let count = count.max(0) as u64;
            stats.total_active += count;
            stats.total_bytes += bytes.unwrap_or(0).max(0) as u64;
            *stats.by_type.entry(image_type.to_string()).or_default() += count;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::adapter::outgoing::db::ImageRepositoryPostgres;
    use crate::media::application::ports::outgoing::{ImageRepository, NewImage};
    use crate::tests::support::sqlite::{insert_user, memory_db};

    async fn seed(
        repo: &ImageRepositoryPostgres,
        owner: Uuid,
        image_type: ImageType,
        project_id: Option<Uuid>,
        name: &str,
    ) -> Image {
        repo.record_image(NewImage {
            filename: name.to_string(),
            original_filename: name.to_string(),
            file_path: format!("/srv/{name}"),
            file_url: format!("/static/uploads/{name}"),
            file_size: 100,
            mime_type: "image/png".into(),
            image_type,
            user_id: owner.into(),
            project_id,
            blog_id: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn entity_listing_and_count_skip_inactive_rows() {
        let db = memory_db().await;
        let owner = insert_user(&db, "alice", true).await;
        let repo = ImageRepositoryPostgres::new(db.clone());
        let query = ImageQueryPostgres::new(db.clone());
        let project = Uuid::new_v4();

        let a = seed(&repo, owner, ImageType::Project, Some(project), "p1.png").await;
        seed(&repo, owner, ImageType::Project, Some(project), "p2.png").await;
        seed(&repo, owner, ImageType::Project, Some(Uuid::new_v4()), "other.png").await;
        repo.deactivate(a.id).await.unwrap();

        assert_eq!(
            query.count_active_for_entity(EntityKind::Project, project).await.unwrap(),
            1
        );
        let page = query
            .list_by_entity(EntityKind::Project, project, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].filename, "p2.png");

        // inactive rows stay visible by id and in the owner's listing
        assert!(!query.find_by_id(a.id).await.unwrap().unwrap().is_active);
        assert_eq!(query.list_by_owner(owner.into()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn type_listing_pages_through_results() {
        let db = memory_db().await;
        let owner = insert_user(&db, "alice", true).await;
        let repo = ImageRepositoryPostgres::new(db.clone());
        let query = ImageQueryPostgres::new(db.clone());

        for i in 0..5 {
            seed(&repo, owner, ImageType::General, None, &format!("g{i}.png")).await;
        }

        let page = query
            .list_by_type(ImageType::General, PageRequest { page: 2, per_page: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pages(), 3);
    }

    #[tokio::test]
    async fn update_cannot_push_a_project_past_its_limit() {
        use crate::auth::application::domain::entities::{Requester, UserId};
        use crate::media::application::domain::policies::upload_policy::UploadPolicy;
        use crate::media::application::ports::incoming::services::UpdateImageService;
        use crate::media::application::ports::incoming::use_cases::{
            UpdateImageCommand, UpdateImageError, UpdateImageUseCase,
        };
        use crate::media::application::ports::outgoing::ImageMetadataPatch;
        use crate::shared::patch::PatchField;

        let db = memory_db().await;
        let owner = insert_user(&db, "alice", true).await;
        let repo = ImageRepositoryPostgres::new(db.clone());
        let query = ImageQueryPostgres::new(db.clone());
        let project = Uuid::new_v4();
        let max = UploadPolicy::MAX_IMAGES_PER_ENTITY;

        for n in 0..max {
            seed(&repo, owner, ImageType::Project, Some(project), &format!("p{n}.png")).await;
        }
        let general = seed(&repo, owner, ImageType::General, None, "g.png").await;

        let service = UpdateImageService::new(repo.clone(), query.clone(), max);
        let result = service
            .execute(UpdateImageCommand {
                requester: Requester {
                    user_id: UserId::from(owner),
                    is_admin: true,
                },
                image_id: general.id,
                patch: ImageMetadataPatch {
                    image_type: Some(ImageType::Project),
                    project_id: PatchField::Value(project),
                    blog_id: PatchField::Unset,
                },
            })
            .await;

        assert!(matches!(result, Err(UpdateImageError::LimitExceeded { .. })));
        assert_eq!(
            query
                .count_active_for_entity(EntityKind::Project, project)
                .await
                .unwrap(),
            max
        );
    }

    #[tokio::test]
    async fn stats_count_active_images_only() {
        let db = memory_db().await;
        let owner = insert_user(&db, "alice", true).await;
        let repo = ImageRepositoryPostgres::new(db.clone());
        let query = ImageQueryPostgres::new(db.clone());

        seed(&repo, owner, ImageType::Hero, None, "h1.png").await;
        seed(&repo, owner, ImageType::Hero, None, "h2.png").await;
        seed(&repo, owner, ImageType::General, None, "g.png").await;

        let stats = query.stats().await.unwrap();
        assert_eq!(stats.total_active, 2);
        assert_eq!(stats.total_bytes, 200);
        assert_eq!(stats.by_type.get("hero"), Some(&1));
        assert_eq!(stats.by_type.get("general"), Some(&1));
    }

    #[tokio::test]
    async fn stats_group_counts_and_bytes_per_type() {
        let db = memory_db().await;
        let owner = insert_user(&db, "alice", true).await;
        let repo = ImageRepositoryPostgres::new(db.clone());
        let query = ImageQueryPostgres::new(db.clone());
        let project = Uuid::new_v4();

        for name in ["g1.png", "g2.png", "g3.png"] {
            seed(&repo, owner, ImageType::General, None, name).await;
        }
        seed(&repo, owner, ImageType::Project, Some(project), "p1.png").await;
        let retired = seed(&repo, owner, ImageType::Project, Some(project), "p2.png").await;
        repo.deactivate(retired.id).await.unwrap();

        let stats = query.stats().await.unwrap();
        assert_eq!(stats.total_active, 4);
        assert_eq!(stats.total_bytes, 400);
        assert_eq!(stats.by_type.get("general"), Some(&3));
        assert_eq!(stats.by_type.get("project"), Some(&1));
        assert_eq!(stats.by_type.len(), 2);
    }
}
