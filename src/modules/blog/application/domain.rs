use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::crud::{RecordRepository, RecordRepositoryError};
use crate::shared::monthly::MonthlyCount;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::shared::patch::PatchField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author_id: Uuid,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `slug` must already be unique, see [`unique_slug`].
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author_id: Uuid,
    pub published: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: PatchField<String>,
    /// Publishing a post that never had a `published_at` stamps it.
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// `published: None` lists drafts and published posts together.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub published: Option<bool>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogStats {
    pub total: u64,
    pub published: u64,
    pub drafts: u64,
    pub total_views: u64,
    /// Published posts per month, by `published_at`
    pub published_per_month: Vec<MonthlyCount>,
}

#[async_trait]
pub trait BlogStore:
    RecordRepository<Record = BlogPost, NewRecord = NewBlogPost, Patch = BlogPatch, Filter = BlogFilter>
{
    async fn list_page(
        &self,
        filter: BlogFilter,
        page: PageRequest,
    ) -> Result<PageResult<BlogPost>, RecordRepositoryError>;

    /// Whether a post other than `except` already uses `slug`.
    async fn slug_taken(&self, slug: &str, except: Option<Uuid>)
        -> Result<bool, RecordRepositoryError>;

    /// Fetches a published post and counts the view in the same statement.
    async fn view_published(&self, slug: &str) -> Result<Option<BlogPost>, RecordRepositoryError>;

    /// Distinct tags over published posts, sorted.
    async fn published_tags(&self) -> Result<Vec<String>, RecordRepositoryError>;

    /// Case-insensitive match on title, content or tags of published posts.
    async fn search(&self, query: &str) -> Result<Vec<BlogPost>, RecordRepositoryError>;

    async fn stats(&self, since: DateTime<Utc>) -> Result<BlogStats, RecordRepositoryError>;
}

pub type BlogRepository = dyn BlogStore;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("static pattern"));

const FALLBACK_SLUG: &str = "post";

/// Lower-cased title with punctuation dropped and whitespace runs turned into `-`.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let dashed = SEPARATORS.replace_all(&stripped, "-");
    dashed.trim_matches('-').to_string()
}

/// Slug for `title`, suffixed `-1`, `-2`, ... until no other post uses it.
pub async fn unique_slug(
    repository: &BlogRepository,
    title: &str,
    except: Option<Uuid>,
) -> Result<String, RecordRepositoryError> {
    let base = match generate_slug(title) {
        slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
        slug => slug,
    };

    if !repository.slug_taken(&base, except).await? {
        return Ok(base);
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !repository.slug_taken(&candidate, except).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
