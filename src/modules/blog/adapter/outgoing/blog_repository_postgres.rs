use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::sea_orm_entity::blogs::{self, ActiveModel as BlogActiveModel, Entity as BlogEntity};
use crate::blog::application::domain::{
    BlogFilter, BlogPatch, BlogPost, BlogStats, BlogStore, NewBlogPost,
};
use crate::shared::crud::{decode_list, encode_list, map_db_err, RecordRepository, RecordRepositoryError};
use crate::shared::monthly::bucket_by_month;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Clone, Debug)]
pub struct BlogRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl BlogRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Tags live in a JSON text column, so match the quoted element.
fn tag_pattern(tag: &str) -> String {
    serde_json::to_string(tag).unwrap_or_else(|_| format!("\"{tag}\""))
}

fn filtered(filter: &BlogFilter) -> Select<BlogEntity> {
    let mut select = BlogEntity::find();
    if let Some(published) = filter.published {
        select = select.filter(blogs::Column::Published.eq(published));
    }
    if let Some(tag) = filter.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(blogs::Column::Tags.contains(tag_pattern(tag)));
    }

    match filter.published {
        Some(true) => select.order_by_desc(blogs::Column::PublishedAt),
        _ => select.order_by_desc(blogs::Column::CreatedAt),
    }
}

fn lower_like(column: blogs::Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{needle}%"))
}

#[async_trait]
impl RecordRepository for BlogRepositoryPostgres {
    type Record = BlogPost;
    type NewRecord = NewBlogPost;
    type Patch = BlogPatch;
    type Filter = BlogFilter;

    async fn create(&self, new: NewBlogPost) -> Result<BlogPost, RecordRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = BlogActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            slug: Set(new.slug),
            content: Set(new.content),
            excerpt: Set(new.excerpt),
            featured_image: Set(new.featured_image),
            author_id: Set(new.author_id),
            published: Set(new.published),
            published_at: Set(new.published.then_some(now)),
            tags: Set(encode_list(&new.tags)),
            views: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, RecordRepositoryError> {
        let row = BlogEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(BlogPost::from))
    }

    async fn list(&self, filter: BlogFilter) -> Result<Vec<BlogPost>, RecordRepositoryError> {
        let rows = filtered(&filter).all(&*self.db).await.map_err(map_db_err)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn update(&self, id: Uuid, patch: BlogPatch) -> Result<BlogPost, RecordRepositoryError> {
        let existing = BlogEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RecordRepositoryError::NotFound)?;

        let now = Utc::now().fixed_offset();
        let first_publish = patch.published == Some(true) && existing.published_at.is_none();

        let mut model = existing.into_active_model();
        if let Some(title) = patch.title {
            model.title = Set(title);
        }
        if let Some(slug) = patch.slug {
            model.slug = Set(slug);
        }
        if let Some(content) = patch.content {
            model.content = Set(content);
        }
        if let Some(excerpt) = patch.excerpt {
            model.excerpt = Set(excerpt);
        }
        if let Some(image) = patch.featured_image.into_update() {
            model.featured_image = Set(image);
        }
        if let Some(tags) = patch.tags {
            model.tags = Set(encode_list(&tags));
        }
        if let Some(published) = patch.published {
            model.published = Set(published);
        }
        if first_publish {
            model.published_at = Set(Some(now));
        }
        model.updated_at = Set(now);

        let updated = model.update(&*self.db).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RecordRepositoryError> {
        let result = BlogEntity::delete_by_id(id)
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
impl BlogStore for BlogRepositoryPostgres {
    async fn list_page(
        &self,
        filter: BlogFilter,
        page: PageRequest,
    ) -> Result<PageResult<BlogPost>, RecordRepositoryError> {
        let select = filtered(&filter);
        let total = select.clone().count(&*self.db).await.map_err(map_db_err)?;
        let rows = select
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: rows.into_iter().map(BlogPost::from).collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn slug_taken(
        &self,
        slug: &str,
        except: Option<Uuid>,
    ) -> Result<bool, RecordRepositoryError> {
        let mut select = BlogEntity::find().filter(blogs::Column::Slug.eq(slug));
        if let Some(id) = except {
            select = select.filter(blogs::Column::Id.ne(id));
        }
        let count = select.count(&*self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn view_published(&self, slug: &str) -> Result<Option<BlogPost>, RecordRepositoryError> {
        let result = BlogEntity::update_many()
            .col_expr(blogs::Column::Views, Expr::col(blogs::Column::Views).add(1))
            .filter(blogs::Column::Slug.eq(slug))
            .filter(blogs::Column::Published.eq(true))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = BlogEntity::find()
            .filter(blogs::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(BlogPost::from))
    }

    async fn published_tags(&self) -> Result<Vec<String>, RecordRepositoryError> {
        let rows: Vec<String> = BlogEntity::find()
            .select_only()
            .column(blogs::Column::Tags)
            .filter(blogs::Column::Published.eq(true))
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let tags: BTreeSet<String> = rows.iter().flat_map(|raw| decode_list(raw)).collect();
        Ok(tags.into_iter().collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<BlogPost>, RecordRepositoryError> {
        let needle = query.trim().to_lowercase();
        let rows = BlogEntity::find()
            .filter(blogs::Column::Published.eq(true))
            .filter(
                Condition::any()
                    .add(lower_like(blogs::Column::Title, &needle))
                    .add(lower_like(blogs::Column::Content, &needle))
                    .add(lower_like(blogs::Column::Tags, &needle)),
            )
            .order_by_desc(blogs::Column::PublishedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn stats(&self, since: DateTime<Utc>) -> Result<BlogStats, RecordRepositoryError> {
        let (total, views): (i64, Option<i64>) = BlogEntity::find()
            .select_only()
            .column_as(Expr::col(blogs::Column::Id).count(), "total")
            .column_as(
                Expr::col(blogs::Column::Views).sum().cast_as(Alias::new("BIGINT")),
                "views",
            )
            .into_tuple()
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .unwrap_or((0, None));
        let published = BlogEntity::find()
            .filter(blogs::Column::Published.eq(true))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        let stamps: Vec<Option<DateTimeWithTimeZone>> = BlogEntity::find()
            .select_only()
            .column(blogs::Column::PublishedAt)
            .filter(blogs::Column::Published.eq(true))
            .filter(blogs::Column::PublishedAt.gte(since.fixed_offset()))
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let total = total.max(0) as u64;
        Ok(BlogStats {
            total,
            published,
            drafts: total.saturating_sub(published),
            total_views: views.unwrap_or(0).max(0) as u64,
            published_per_month: bucket_by_month(
                stamps.into_iter().flatten().map(|ts| ts.with_timezone(&Utc)),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::application::domain::unique_slug;
    use crate::tests::support::sqlite::{insert_user, memory_db};

    fn post(author: Uuid, title: &str, slug: &str, published: bool, tags: &[&str]) -> NewBlogPost {
        NewBlogPost {
            title: title.to_string(),
            slug: slug.to_string(),
            content: format!("All about {title}"),
            excerpt: String::new(),
            featured_image: None,
            author_id: author,
            published,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn publishing_on_create_stamps_published_at() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);

        let draft = repo.create(post(author, "Draft", "draft", false, &[])).await.unwrap();
        let live = repo.create(post(author, "Live", "live", true, &[])).await.unwrap();

        assert!(draft.published_at.is_none());
        assert!(live.published_at.is_some());
    }

    #[tokio::test]
    async fn first_publish_stamps_and_republish_keeps_the_date() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);
        let draft = repo.create(post(author, "Draft", "draft", false, &[])).await.unwrap();

        let publish = || BlogPatch {
            published: Some(true),
            ..Default::default()
        };
        let first = repo.update(draft.id, publish()).await.unwrap();
        let stamped = first.published_at.unwrap();

        repo.update(
            draft.id,
            BlogPatch {
                published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let again = repo.update(draft.id, publish()).await.unwrap();

        assert_eq!(again.published_at, Some(stamped));
    }

    #[tokio::test]
    async fn viewing_counts_only_published_posts() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);
        repo.create(post(author, "Live", "live", true, &[])).await.unwrap();
        repo.create(post(author, "Draft", "draft", false, &[])).await.unwrap();

        repo.view_published("live").await.unwrap();
        let seen = repo.view_published("live").await.unwrap().unwrap();
        assert_eq!(seen.views, 2);

        assert!(repo.view_published("draft").await.unwrap().is_none());
        assert!(repo.view_published("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tag_filter_matches_whole_tags() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);
        repo.create(post(author, "A", "a", true, &["rust", "web"])).await.unwrap();
        repo.create(post(author, "B", "b", true, &["rustacean"])).await.unwrap();
        repo.create(post(author, "C", "c", false, &["rust"])).await.unwrap();

        let page = repo
            .list_page(
                BlogFilter {
                    published: Some(true),
                    tag: Some("rust".into()),
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].slug, "a");

        assert_eq!(
            repo.published_tags().await.unwrap(),
            vec!["rust", "rustacean", "web"]
        );
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_published_posts() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);
        repo.create(post(author, "Async Rust", "async-rust", true, &[])).await.unwrap();
        repo.create(post(author, "Gardening", "gardening", true, &["Tokio"])).await.unwrap();
        repo.create(post(author, "Rust drafts", "rust-drafts", false, &[])).await.unwrap();

        let hits = repo.search("RUST").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "async-rust");

        assert_eq!(repo.search("tokio").await.unwrap()[0].slug, "gardening");
    }

    #[tokio::test]
    async fn unique_slug_appends_counters() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo: Arc<crate::blog::application::domain::BlogRepository> =
            Arc::new(BlogRepositoryPostgres::new(db));

        assert_eq!(unique_slug(&*repo, "Hello World", None).await.unwrap(), "hello-world");
        let first = repo
            .create(post(author, "Hello World", "hello-world", true, &[]))
            .await
            .unwrap();
        repo.create(post(author, "Hello World", "hello-world-1", true, &[]))
            .await
            .unwrap();

        assert_eq!(unique_slug(&*repo, "Hello, World!", None).await.unwrap(), "hello-world-2");
        // a post keeps its own slug
        assert_eq!(
            unique_slug(&*repo, "Hello World", Some(first.id)).await.unwrap(),
            "hello-world"
        );
        assert_eq!(unique_slug(&*repo, "???", None).await.unwrap(), "post");
    }

    #[tokio::test]
    async fn stats_count_drafts_views_and_recent_publications() {
        let db = memory_db().await;
        let author = insert_user(&db, "alice", true).await;
        let repo = BlogRepositoryPostgres::new(db);
        repo.create(post(author, "Live", "live", true, &[])).await.unwrap();
        repo.create(post(author, "Also live", "also-live", true, &[])).await.unwrap();
        repo.create(post(author, "Draft", "draft", false, &[])).await.unwrap();
        for _ in 0..3 {
            repo.view_published("live").await.unwrap();
        }

        let stats = repo.stats(Utc::now() - chrono::Duration::days(365)).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.total_views, 3);
        assert_eq!(stats.published_per_month.iter().map(|m| m.count).sum::<u64>(), 2);
    }

    #[tokio::test]
    async fn stats_on_an_empty_blog_are_zero() {
        let repo = BlogRepositoryPostgres::new(memory_db().await);
        let stats = repo.stats(Utc::now()).await.unwrap();
        assert_eq!(stats, BlogStats::default());
    }
}
