use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::domain::entities::{EntityKind, Image, ImageStats, ImageType};
use crate::media::application::domain::file_names::final_segment;
use crate::media::application::domain::policies::upload_policy::UploadPolicy;
use crate::media::application::media_use_cases::MediaUseCases;
use crate::media::application::ports::incoming::services::{
    DeleteImageService, ImageReadService, UpdateImageService, UploadImageService,
};
use crate::media::application::ports::outgoing::{
    ImageMetadataPatch, ImageQuery, ImageQueryError, ImageRepository, ImageRepositoryError,
    ImageStorage, NewImage, StorageError, StoredFile,
};
use crate::shared::pagination::{PageRequest, PageResult};

pub fn sample_image() -> Image {
    let id = Uuid::new_v4();
    let filename = format!("general_sample_{}.png", &id.simple().to_string()[..8]);
    let now = Utc::now();
    Image {
        id,
        original_filename: "sample.png".to_string(),
        file_path: format!("/srv/uploads/{filename}"),
        file_url: format!("/static/uploads/{filename}"),
        filename,
        file_size: 4,
        mime_type: "image/png".to_string(),
        image_type: ImageType::General,
        user_id: UserId::new(),
        project_id: None,
        blog_id: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================
// Image rows
// ============================================================

/// Image registry in a vector. Mirrors the one-active-profile-image rule of
/// the SQL repository; clones share rows.
#[derive(Clone, Default)]
pub struct InMemoryImages {
    rows: Arc<Mutex<Vec<Image>>>,
    reject_writes: bool,
}

impl InMemoryImages {
    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, image: Image) {
        self.rows.lock().unwrap().push(image);
    }

    pub fn get(&self, image_id: Uuid) -> Option<Image> {
        self.rows.lock().unwrap().iter().find(|i| i.id == image_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn active_matching(&self, pred: impl Fn(&Image) -> bool) -> Vec<Image> {
        let mut found: Vec<Image> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.is_active && pred(i))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

fn belongs_to(image: &Image, kind: EntityKind, entity_id: Uuid) -> bool {
    match kind {
        EntityKind::Project => image.project_id == Some(entity_id),
        EntityKind::Blog => image.blog_id == Some(entity_id),
        EntityKind::User => image.user_id.value() == entity_id,
    }
}

fn paged(items: Vec<Image>, page: PageRequest) -> PageResult<Image> {
    let total = items.len() as u64;
    PageResult {
        items: items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect(),
        page: page.page,
        per_page: page.per_page,
        total,
    }
}

fn retire_profile_images(rows: &mut [Image], owner: UserId, image_type: ImageType, keep: Uuid) {
    for row in rows.iter_mut() {
        if row.id != keep && row.user_id == owner && row.image_type == image_type && row.is_active {
            row.is_active = false;
        }
    }
}

#[async_trait]
impl ImageQuery for InMemoryImages {
    async fn find_by_id(&self, image_id: Uuid) -> Result<Option<Image>, ImageQueryError> {
        Ok(self.get(image_id))
    }

    async fn count_active_for_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, ImageQueryError> {
        Ok(self.active_matching(|i| belongs_to(i, kind, entity_id)).len() as u64)
    }

    async fn list_by_type(
        &self,
        image_type: ImageType,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError> {
        Ok(paged(self.active_matching(|i| i.image_type == image_type), page))
    }

    async fn list_by_entity(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Image>, ImageQueryError> {
        Ok(paged(self.active_matching(|i| belongs_to(i, kind, entity_id)), page))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Image>, ImageQueryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|i| i.user_id == owner).cloned().collect())
    }

    async fn stats(&self) -> Result<ImageStats, ImageQueryError> {
        let mut stats = ImageStats::default();
        for image in self.active_matching(|_| true) {
            stats.total_active += 1;
            stats.total_bytes += image.file_size.max(0) as u64;
            *stats.by_type.entry(image.image_type.to_string()).or_default() += 1;
        }
        Ok(stats)
    }
}

#[async_trait]
impl ImageRepository for InMemoryImages {
    async fn record_image(&self, new: NewImage) -> Result<Image, ImageRepositoryError> {
        if self.reject_writes {
            return Err(ImageRepositoryError::DatabaseError("writes rejected".into()));
        }

        let now = Utc::now();
        let image = Image {
            id: Uuid::new_v4(),
            filename: new.filename,
            original_filename: new.original_filename,
            file_path: new.file_path,
            file_url: new.file_url,
            file_size: new.file_size,
            mime_type: new.mime_type,
            image_type: new.image_type,
            user_id: new.user_id,
            project_id: new.project_id,
            blog_id: new.blog_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let mut rows = self.rows.lock().unwrap();
        if image.image_type.is_profile() {
            retire_profile_images(&mut rows, image.user_id, image.image_type, image.id);
        }
        rows.push(image.clone());
        Ok(image)
    }

    async fn deactivate(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.id == image_id && i.is_active)
            .ok_or(ImageRepositoryError::NotFound)?;
        row.is_active = false;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, image_id: Uuid) -> Result<Image, ImageRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|i| i.id == image_id)
            .ok_or(ImageRepositoryError::NotFound)?;
        Ok(rows.remove(index))
    }

    async fn update_metadata(
        &self,
        image_id: Uuid,
        patch: ImageMetadataPatch,
    ) -> Result<Image, ImageRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.id == image_id)
            .ok_or(ImageRepositoryError::NotFound)?;

        if let Some(image_type) = patch.image_type {
            row.image_type = image_type;
        }
        if let Some(project_id) = patch.project_id.into_update() {
            row.project_id = project_id;
        }
        if let Some(blog_id) = patch.blog_id.into_update() {
            row.blog_id = blog_id;
        }
        row.updated_at = Utc::now();
        let updated = row.clone();

        if updated.is_active && updated.image_type.is_profile() {
            retire_profile_images(&mut rows, updated.user_id, updated.image_type, updated.id);
        }
        Ok(updated)
    }
}

// ============================================================
// File storage
// ============================================================

/// Storage that only remembers file names and sizes.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<BTreeMap<String, u64>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn put(&self, file_name: &str) {
        self.files.lock().unwrap().insert(file_name.to_string(), 0);
    }

    pub fn remove(&self, file_name: &str) {
        self.files.lock().unwrap().remove(file_name);
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.lock().unwrap().contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for MemoryStorage {
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<StoredFile, StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io("disk full".into()));
        }

        let mut files = self.files.lock().unwrap();
        if files.contains_key(file_name) {
            return Err(StorageError::Io(format!("{file_name} already exists")));
        }
        files.insert(file_name.to_string(), bytes.len() as u64);

        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_path: format!("/memory/{file_name}"),
            file_url: format!("/static/uploads/{file_name}"),
            size: bytes.len() as u64,
        })
    }

    async fn delete(&self, path_or_url: &str) -> bool {
        self.files
            .lock()
            .unwrap()
            .remove(final_segment(path_or_url))
            .is_some()
    }

    async fn size(&self, file_path: &str) -> Result<u64, StorageError> {
        self.files
            .lock()
            .unwrap()
            .get(final_segment(file_path))
            .copied()
            .ok_or_else(|| StorageError::Io(format!("{file_path} not found")))
    }
}

/// Media services wired to the given fakes, as `main` wires the real adapters.
pub fn media_use_cases(images: &InMemoryImages, storage: &MemoryStorage) -> MediaUseCases {
    let storage: Arc<dyn ImageStorage> = Arc::new(storage.clone());
    let read = Arc::new(ImageReadService::new(images.clone()));
    let delete = Arc::new(DeleteImageService::new(images.clone(), images.clone(), storage.clone()));

    MediaUseCases {
        upload: Arc::new(UploadImageService::new(
            images.clone(),
            images.clone(),
            storage,
            UploadPolicy::new("/unused"),
        )),
        get: read.clone(),
        list: read.clone(),
        stats: read,
        soft_delete: delete.clone(),
        hard_delete: delete.clone(),
        delete_own: delete,
        update: Arc::new(UpdateImageService::new(
            images.clone(),
            images.clone(),
            UploadPolicy::MAX_IMAGES_PER_ENTITY,
        )),
    }
}
