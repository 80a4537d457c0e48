use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use inkpost_cache::{Listing, ListingCache};
use inkpost_core::slug::{disambiguate, slugify};
use inkpost_core::AppError;
use inkpost_models::{Article, ArticleFields, ArticleWithOwner, NewArticle};

use crate::metrics;

use super::repository::{ArticleRepository, RepositoryError};

/// Inserts attempted per `create` before a slug collision is reported as 409.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

/// Article store: slug assignment, ownership checks and listing cache upkeep.
///
/// Role checks happen in the route guard before any method here runs.
/// Ownership is checked here because it depends on the stored record.
#[derive(Clone)]
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
    listing: ListingCache,
}

impl std::fmt::Debug for ArticleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleService")
            .field("listing", &self.listing)
            .finish_non_exhaustive()
    }
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>, listing: ListingCache) -> Self {
        Self { repo, listing }
    }

    /// Stores a new article owned by `owner_id`.
    ///
    /// The slug is `slugify(title)`, or that slug followed by the current Unix
    /// time in seconds when it is already taken. The existence check and the
    /// insert are not atomic; a unique violation from the repository is retried
    /// with a freshly resolved slug up to [`MAX_INSERT_ATTEMPTS`] times.
    #[instrument(skip(self, fields), fields(article.title = %fields.title, user.id = %owner_id))]
    pub async fn create(&self, fields: ArticleFields, owner_id: i64) -> Result<Article, AppError> {
        let base = slugify(&fields.title);

        for attempt in 0..MAX_INSERT_ATTEMPTS {
            let slug = self.resolve_slug(&base, attempt).await?;
            let new_article = NewArticle::new(fields.clone(), slug, owner_id);

            match self.repo.insert(new_article).await {
                Ok(article) => {
                    info!(article.id = %article.id, article.slug = %article.slug, "Article created");
                    self.invalidate_listing().await;
                    return Ok(article);
                }
                Err(RepositoryError::UniqueViolation(slug)) => {
                    warn!(article.slug = %slug, attempt = attempt + 1, "Slug taken at insert, retrying");
                    metrics::track_slug_conflict_retry();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::conflict(anyhow!(
            "Could not allocate a unique slug for \"{}\"",
            fields.title
        )))
    }

    #[instrument(skip(self), fields(article.slug = %slug))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Article, AppError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Article not found")))
    }

    /// Replaces title, description and tag. Only the owner may do this.
    #[instrument(skip(self, fields), fields(article.slug = %slug, user.id = %requester_id))]
    pub async fn update(
        &self,
        slug: &str,
        fields: ArticleFields,
        requester_id: i64,
    ) -> Result<Article, AppError> {
        let article = self.get_by_slug(slug).await?;

        if article.owner_id != requester_id {
            warn!(article.owner = %article.owner_id, "Rejected update by non-owner");
            return Err(AppError::forbidden(anyhow!("Data is forbidden")));
        }

        let updated = self
            .repo
            .update_fields(article.id, &fields)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Article not found")))?;

        info!(article.id = %updated.id, "Article updated");
        self.invalidate_listing().await;

        Ok(updated)
    }

    /// Removes an article. Callers are expected to have checked the admin role.
    #[instrument(skip(self), fields(article.slug = %slug))]
    pub async fn delete(&self, slug: &str) -> Result<Article, AppError> {
        let article = self.get_by_slug(slug).await?;

        if !self.repo.delete(article.id).await? {
            return Err(AppError::not_found(anyhow!("Article not found")));
        }

        info!(article.id = %article.id, "Article deleted");
        self.invalidate_listing().await;

        Ok(article)
    }

    /// Every article in creation order, read straight from the repository.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ArticleWithOwner>, AppError> {
        Ok(self.repo.list_all().await?)
    }

    /// The serialized listing, from cache when present.
    #[instrument(skip(self))]
    pub async fn listing(&self) -> Result<Listing, AppError> {
        let listing = self
            .listing
            .get_or_populate(|| async {
                let articles = self.list().await?;
                Ok::<_, AppError>(serde_json::to_string(&articles)?)
            })
            .await?;

        metrics::track_listing_cache(listing.source.is_hit());

        Ok(listing)
    }

    #[instrument(skip(self), fields(user.id = %owner_id))]
    pub async fn articles_by_owner(&self, owner_id: i64) -> Result<Vec<Article>, AppError> {
        Ok(self.repo.list_by_owner(owner_id).await?)
    }

    async fn resolve_slug(&self, base: &str, attempt: usize) -> Result<String, AppError> {
        if !self.slug_taken(base).await? {
            return Ok(base.to_string());
        }

        let stamped = disambiguate(base, Utc::now().timestamp());

        // a retry inside the same second would reproduce the losing slug
        if attempt > 0 && self.slug_taken(&stamped).await? {
            return Ok(format!("{}-{}", stamped, attempt + 1));
        }

        Ok(stamped)
    }

    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.repo.find_by_slug(slug).await?.is_some())
    }

    async fn invalidate_listing(&self) {
        match self.listing.invalidate().await {
            Ok(removed) => debug!(cache.removed = removed, "Listing cache invalidated"),
            Err(e) => {
                warn!(error = %e, cache.key = %self.listing.key(), "Failed to invalidate listing cache");
                metrics::track_invalidation_failure();
            }
        }
    }
}
