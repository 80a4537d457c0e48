//! Persistence contract for articles and its PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, instrument};

use inkpost_models::{Article, ArticleFields, ArticleWithOwner, NewArticle};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The insert collided with an existing slug.
    #[error("Slug already exists: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Record store for articles.
///
/// `insert` must report a slug collision as [`RepositoryError::UniqueViolation`]
/// so callers can retry with a different slug.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> Result<Article, RepositoryError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError>;

    /// Replaces title, description and tag. Returns `None` if the row is gone.
    async fn update_fields(
        &self,
        id: i64,
        fields: &ArticleFields,
    ) -> Result<Option<Article>, RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Every article in creation order, with its owner's display name.
    async fn list_all(&self) -> Result<Vec<ArticleWithOwner>, RepositoryError>;

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Article>, RepositoryError>;
}

const ARTICLE_COLUMNS: &str =
    "id, title, description, tag, slug, user_id, created_at, updated_at";

pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self, article), fields(article.slug = %article.slug, db.operation = "INSERT", db.table = "articles"))]
    async fn insert(&self, article: NewArticle) -> Result<Article, RepositoryError> {
        sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (title, description, tag, slug, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.tag)
        .bind(&article.slug)
        .bind(article.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return RepositoryError::UniqueViolation(article.slug.clone());
            }
            error!(error = %e, article.slug = %article.slug, "Database error inserting article");
            RepositoryError::from(e)
        })
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "articles"))]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "articles"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self, fields), fields(db.operation = "UPDATE", db.table = "articles"))]
    async fn update_fields(
        &self,
        id: i64,
        fields: &ArticleFields,
    ) -> Result<Option<Article>, RepositoryError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles
             SET title = $1, description = $2, tag = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.tag)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "articles"))]
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "articles"))]
    async fn list_all(&self) -> Result<Vec<ArticleWithOwner>, RepositoryError> {
        let articles = sqlx::query_as::<_, ArticleWithOwner>(
            "SELECT a.id, a.title, a.description, a.tag, a.slug, a.user_id,
                    a.created_at, a.updated_at,
                    COALESCE(NULLIF(u.fullname, ''), u.username) AS owner_name
             FROM articles a
             LEFT JOIN users u ON u.id = a.user_id
             ORDER BY a.id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "articles"))]
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Article>, RepositoryError> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }
}
