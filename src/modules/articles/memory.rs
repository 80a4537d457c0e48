//! In-process [`ArticleRepository`] for tests.
//!
//! Enforces slug uniqueness the same way the database does and can be told to
//! fail on demand: `fail_next_inserts_with_conflict` makes the next N inserts
//! report a unique violation even when the slug is free, and `set_unavailable`
//! makes every call fail.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use inkpost_models::{Article, ArticleFields, ArticleWithOwner, NewArticle};

use super::repository::{ArticleRepository, RepositoryError};

#[derive(Default)]
struct Tables {
    next_id: i64,
    articles: BTreeMap<i64, Article>,
}

#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    tables: Arc<RwLock<Tables>>,
    owner_names: Arc<RwLock<HashMap<i64, String>>>,
    forced_conflicts: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
    insert_attempts: Arc<AtomicUsize>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name reported by `list_all` for articles owned by `owner_id`.
    pub async fn set_owner_name(&self, owner_id: i64, name: impl Into<String>) {
        self.owner_names.write().await.insert(owner_id, name.into());
    }

    pub fn fail_next_inserts_with_conflict(&self, count: usize) {
        self.forced_conflicts.store(count, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `insert` calls, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory repository switched off".to_string(),
            ));
        }
        Ok(())
    }

    fn take_forced_conflict(&self) -> bool {
        self.forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> Result<Article, RepositoryError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        if self.take_forced_conflict() {
            return Err(RepositoryError::UniqueViolation(article.slug));
        }

        let mut tables = self.tables.write().await;
        if tables.articles.values().any(|a| a.slug == article.slug) {
            return Err(RepositoryError::UniqueViolation(article.slug));
        }

        tables.next_id += 1;
        let now = Utc::now();
        let stored = Article {
            id: tables.next_id,
            title: article.title,
            description: article.description,
            tag: article.tag,
            slug: article.slug,
            owner_id: article.owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.articles.values().find(|a| a.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.articles.get(&id).cloned())
    }

    async fn update_fields(
        &self,
        id: i64,
        fields: &ArticleFields,
    ) -> Result<Option<Article>, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        Ok(tables.articles.get_mut(&id).map(|article| {
            article.title = fields.title.clone();
            article.description = fields.description.clone();
            article.tag = fields.tag.clone();
            article.updated_at = Utc::now();
            article.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.write().await.articles.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<ArticleWithOwner>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let names = self.owner_names.read().await;

        Ok(tables
            .articles
            .values()
            .map(|article| ArticleWithOwner {
                article: article.clone(),
                owner_name: names.get(&article.owner_id).cloned(),
            })
            .collect())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Article>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;

        Ok(tables
            .articles
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
