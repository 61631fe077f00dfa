use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::sea_orm_entity::images::{self, ActiveModel as ImageActiveModel, Entity as ImageEntity};
use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::media::application::ports::outgoing::{
    ImageMetadataPatch, ImageRepository, ImageRepositoryError, NewImage,
};

#[derive(Clone, Debug)]
pub struct ImageRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ImageRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> ImageRepositoryError {
    ImageRepositoryError::DatabaseError(e.to_string())
}

/// User column mirroring the active image of a profile type.
fn owner_url_column(image_type: ImageType) -> Option<users::Column> {
    match image_type {
        ImageType::Hero => Some(users::Column::HeroImageUrl),
        ImageType::About => Some(users::Column::AboutImageUrl),
        ImageType::Avatar => Some(users::Column::AvatarUrl),
        _ => None,
    }
}

/// Serialises profile-image writes per owner. SQLite has no row locks and runs
/// writers one at a time anyway.
async fn lock_owner(txn: &DatabaseTransaction, owner: Uuid) -> Result<(), ImageRepositoryError> {
    let mut select = users::Entity::find_by_id(owner);
    if txn.get_database_backend() == DatabaseBackend::Postgres {
        select = select.lock_exclusive();
    }

    select
        .one(txn)
        .await
        .map_err(map_db_err)?
        .map(|_| ())
        .ok_or(ImageRepositoryError::OwnerNotFound)
}

async fn find_row(txn: &DatabaseTransaction, image_id: Uuid) -> Result<images::Model, ImageRepositoryError> {
    ImageEntity::find_by_id(image_id)
        .one(txn)
        .await
        .map_err(map_db_err)?
        .ok_or(ImageRepositoryError::NotFound)
}

/// Deactivates every active image of `image_type` for `owner` except `keep`.
async fn deactivate_profile_images(
    txn: &DatabaseTransaction,
    owner: Uuid,
    image_type: ImageType,
    keep: Option<Uuid>,
) -> Result<u64, ImageRepositoryError> {
    let mut update = ImageEntity::update_many()
        .col_expr(images::Column::IsActive, Expr::value(false))
        .col_expr(images::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(images::Column::UserId.eq(owner))
        .filter(images::Column::ImageType.eq(images::ImageKind::from(image_type)))
        .filter(images::Column::IsActive.eq(true));
    if let Some(keep) = keep {
        update = update.filter(images::Column::Id.ne(keep));
    }

    let result = update.exec(txn).await.map_err(map_db_err)?;
    Ok(result.rows_affected)
}

async fn set_owner_url(
    txn: &DatabaseTransaction,
    owner: Uuid,
    image_type: ImageType,
    url: &str,
) -> Result<(), ImageRepositoryError> {
    let Some(column) = owner_url_column(image_type) else {
        return Ok(());
    };

    users::Entity::update_many()
        .col_expr(column, Expr::value(Some(url.to_string())))
        .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(users::Column::Id.eq(owner))
        .exec(txn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

/// Clears the owner's profile URL only while it still points at `image`.
async fn clear_owner_url(
    txn: &DatabaseTransaction,
    image: &images::Model,
) -> Result<(), ImageRepositoryError> {
    let Some(column) = owner_url_column(image.image_type.into()) else {
        return Ok(());
    };

    users::Entity::update_many()
        .col_expr(column, Expr::value(Option::<String>::None))
        .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(users::Column::Id.eq(image.user_id))
        .filter(column.eq(image.file_url.clone()))
        .exec(txn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

async fn record_in(txn: &DatabaseTransaction, new: NewImage) -> Result<Image, ImageRepositoryError> {
    let owner = new.user_id.value();
    lock_owner(txn, owner).await?;

    if new.image_type.is_profile() {
        let replaced = deactivate_profile_images(txn, owner, new.image_type, None).await?;
        debug!(%owner, image_type = %new.image_type, replaced, "Previous profile image deactivated");
    }

    let now = Utc::now().fixed_offset();
    let inserted = ImageActiveModel {
        id: Set(Uuid::new_v4()),
        filename: Set(new.filename),
        original_filename: Set(new.original_filename),
        file_path: Set(new.file_path),
        file_url: Set(new.file_url.clone()),
        file_size: Set(new.file_size),
        mime_type: Set(new.mime_type),
        image_type: Set(new.image_type.into()),
        user_id: Set(owner),
        project_id: Set(new.project_id),
        blog_id: Set(new.blog_id),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await
    .map_err(map_db_err)?;

    set_owner_url(txn, owner, new.image_type, &new.file_url).await?;
    Ok(inserted.into())
}

async fn deactivate_in(txn: &DatabaseTransaction, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
    let existing = find_row(txn, image_id).await?;
    if !existing.is_active {
        return Err(ImageRepositoryError::NotFound);
    }

    clear_owner_url(txn, &existing).await?;

    let mut model = existing.into_active_model();
    model.is_active = Set(false);
    model.updated_at = Set(Utc::now().fixed_offset());
    let updated = model.update(txn).await.map_err(map_db_err)?;
    Ok(updated.into())
}

async fn delete_in(txn: &DatabaseTransaction, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
    let existing = find_row(txn, image_id).await?;
    clear_owner_url(txn, &existing).await?;

    ImageEntity::delete_by_id(image_id)
        .exec(txn)
        .await
        .map_err(map_db_err)?;
    Ok(existing.into())
}

async fn update_in(
    txn: &DatabaseTransaction,
    image_id: Uuid,
    patch: ImageMetadataPatch,
) -> Result<Image, ImageRepositoryError> {
    let existing = find_row(txn, image_id).await?;
    let old_type: ImageType = existing.image_type.into();
    let new_type = patch.image_type.unwrap_or(old_type);

    let mut model = existing.clone().into_active_model();
    if new_type != old_type {
        model.image_type = Set(new_type.into());
    }
    if let Some(project_id) = patch.project_id.into_update() {
        model.project_id = Set(project_id);
    }
    if let Some(blog_id) = patch.blog_id.into_update() {
        model.blog_id = Set(blog_id);
    }

    if !model.is_changed() {
        return Ok(existing.into());
    }

    if new_type != old_type {
        if old_type.is_profile() {
            clear_owner_url(txn, &existing).await?;
        }
        if new_type.is_profile() && existing.is_active {
            lock_owner(txn, existing.user_id).await?;
            deactivate_profile_images(txn, existing.user_id, new_type, Some(image_id)).await?;
            set_owner_url(txn, existing.user_id, new_type, &existing.file_url).await?;
        }
    }

    model.updated_at = Set(Utc::now().fixed_offset());
    let updated = model.update(txn).await.map_err(map_db_err)?;
    Ok(updated.into())
}

/// Commits when `$body` succeeds, rolls back otherwise.
macro_rules! in_transaction {
    ($db:expr, |$txn:ident| $body:expr) => {{
        let $txn = $db.begin().await.map_err(map_db_err)?;
        match $body.await {
            Ok(value) => {
                $txn.commit().await.map_err(map_db_err)?;
                Ok(value)
            }
            Err(e) => {
                let _ = $txn.rollback().await;
                Err(e)
            }
        }
    }};
}

#[async_trait]
impl ImageRepository for ImageRepositoryPostgres {
    async fn record_image(&self, image: NewImage) -> Result<Image, ImageRepositoryError> {
        in_transaction!(self.db, |txn| record_in(&txn, image))
    }

    async fn deactivate(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
        in_transaction!(self.db, |txn| deactivate_in(&txn, image_id))
    }

    async fn delete(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
        in_transaction!(self.db, |txn| delete_in(&txn, image_id))
    }

    async fn update_metadata(
        &self,
        image_id: Uuid,
        patch: ImageMetadataPatch,
    ) -> Result<Image, ImageRepositoryError> {
        in_transaction!(self.db, |txn| update_in(&txn, image_id, patch))
    }
}
