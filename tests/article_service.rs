mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;

use common::{FailingCache, LISTING_KEY};
use inkpost::modules::articles::{ArticleService, InMemoryArticleRepository, MAX_INSERT_ATTEMPTS};
use inkpost_cache::{CacheBackend, InMemoryCache, ListingCache, ListingSource};
use inkpost_models::{ArticleFields, ArticleWithOwner};

fn fields(title: &str) -> ArticleFields {
    ArticleFields {
        title: title.to_string(),
        description: "Seekor tupai terbang di atas pohon.".to_string(),
        tag: "fiction".to_string(),
    }
}

fn service_with(repo: &InMemoryArticleRepository, cache: Arc<dyn CacheBackend>) -> ArticleService {
    ArticleService::new(Arc::new(repo.clone()), ListingCache::new(cache, LISTING_KEY))
}

fn service() -> (ArticleService, InMemoryArticleRepository, InMemoryCache) {
    let repo = InMemoryArticleRepository::new();
    let cache = InMemoryCache::new();
    (service_with(&repo, Arc::new(cache.clone())), repo, cache)
}

fn parse_listing(payload: &str) -> Vec<ArticleWithOwner> {
    serde_json::from_str(payload).unwrap()
}

#[tokio::test]
async fn test_create_uses_title_slug() {
    let (service, _, _) = service();
    let article = service.create(fields("Tupai terbang"), 1).await.unwrap();

    assert_eq!(article.slug, "tupai-terbang");
    assert_eq!(article.owner_id, 1);
    assert_eq!(article.title, "Tupai terbang");
}

#[tokio::test]
async fn test_non_latin_titles_get_distinct_slugs() {
    let (service, _, _) = service();
    let russian = service.create(fields("Привет мир"), 1).await.unwrap();
    let french = service.create(fields("Café crème"), 1).await.unwrap();

    assert_eq!(russian.slug, "privet-mir");
    assert_eq!(french.slug, "cafe-creme");
}

#[tokio::test]
async fn test_duplicate_title_gets_timestamp_suffix() {
    let (service, _, _) = service();
    service.create(fields("Tupai terbang"), 1).await.unwrap();

    let before = Utc::now().timestamp();
    let second = service.create(fields("Tupai terbang"), 2).await.unwrap();
    let after = Utc::now().timestamp();

    let suffix: i64 = second
        .slug
        .strip_prefix("tupai-terbang")
        .unwrap()
        .parse()
        .unwrap();
    assert!(suffix >= before && suffix <= after);
}

#[tokio::test]
async fn test_slugs_stay_unique_within_one_second() {
    let (service, repo, _) = service();
    let mut slugs = Vec::new();
    for owner in 1..=3 {
        slugs.push(service.create(fields("Same title"), owner).await.unwrap().slug);
    }

    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), 3);
    assert!(slugs.iter().all(|s| s.starts_with("same-title")));
    assert_eq!(repo.len().await, 3);
}

#[tokio::test]
async fn test_insert_conflict_is_retried() {
    let (service, repo, _) = service();
    repo.fail_next_inserts_with_conflict(1);

    let article = service.create(fields("Race"), 1).await.unwrap();

    assert_eq!(repo.insert_attempts(), 2);
    assert!(article.slug.starts_with("race"));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_conflict_after_retry_budget() {
    let (service, repo, _) = service();
    repo.fail_next_inserts_with_conflict(MAX_INSERT_ATTEMPTS);

    let err = service.create(fields("Race"), 1).await.unwrap_err();

    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(repo.insert_attempts(), MAX_INSERT_ATTEMPTS);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_get_unknown_slug_is_not_found() {
    let (service, _, _) = service();
    let err = service.get_by_slug("nope").await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_can_update() {
    let (service, _, _) = service();
    let created = service.create(fields("Draft"), 1).await.unwrap();

    let updated = service
        .update(&created.slug, fields("Final title"), 1)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Final title");
    assert_eq!(updated.slug, "draft");
    assert_eq!(updated.owner_id, 1);
}

#[tokio::test]
async fn test_non_owner_cannot_update() {
    let (service, _, _) = service();
    let created = service.create(fields("Mine"), 1).await.unwrap();

    let err = service
        .update(&created.slug, fields("Hijacked"), 2)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(err.error.to_string(), "Data is forbidden");

    let stored = service.get_by_slug(&created.slug).await.unwrap();
    assert_eq!(stored.title, "Mine");
}

#[tokio::test]
async fn test_update_and_delete_unknown_slug() {
    let (service, _, _) = service();
    assert_eq!(
        service.update("ghost", fields("x"), 1).await.unwrap_err().status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        service.delete("ghost").await.unwrap_err().status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_removes_article() {
    let (service, repo, _) = service();
    let created = service.create(fields("Gone soon"), 1).await.unwrap();

    let deleted = service.delete(&created.slug).await.unwrap();

    assert_eq!(deleted.id, created.id);
    assert!(repo.is_empty().await);
    assert_eq!(
        service.get_by_slug(&created.slug).await.unwrap_err().status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_listing_is_served_from_cache_after_first_read() {
    let (service, repo, cache) = service();
    repo.set_owner_name(1, "Ayu Lestari").await;
    service.create(fields("First"), 1).await.unwrap();

    let first = service.listing().await.unwrap();
    assert_eq!(first.source, ListingSource::Store);
    assert!(!cache.is_empty().await);

    let second = service.listing().await.unwrap();
    assert_eq!(second.source, ListingSource::Cache);
    assert_eq!(second.payload, first.payload);

    let entries = parse_listing(&second.payload);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].owner_name.as_deref(), Some("Ayu Lestari"));
}

#[tokio::test]
async fn test_mutations_invalidate_listing() {
    let (service, _, cache) = service();
    let created = service.create(fields("One"), 1).await.unwrap();
    service.listing().await.unwrap();

    service.create(fields("Two"), 1).await.unwrap();
    assert!(cache.is_empty().await);
    let after_create = service.listing().await.unwrap();
    assert_eq!(after_create.source, ListingSource::Store);
    assert_eq!(parse_listing(&after_create.payload).len(), 2);

    service.update(&created.slug, fields("One, revised"), 1).await.unwrap();
    let after_update = service.listing().await.unwrap();
    assert_eq!(after_update.source, ListingSource::Store);
    assert_eq!(parse_listing(&after_update.payload)[0].article.title, "One, revised");

    service.delete(&created.slug).await.unwrap();
    let after_delete = service.listing().await.unwrap();
    assert_eq!(after_delete.source, ListingSource::Store);
    assert_eq!(parse_listing(&after_delete.payload).len(), 1);
}

#[tokio::test]
async fn test_rejected_update_keeps_cached_listing() {
    let (service, _, _) = service();
    let created = service.create(fields("Stable"), 1).await.unwrap();
    service.listing().await.unwrap();

    service.update(&created.slug, fields("No"), 2).await.unwrap_err();

    assert_eq!(service.listing().await.unwrap().source, ListingSource::Cache);
}

#[tokio::test]
async fn test_cache_outage_does_not_fail_mutations() {
    let repo = InMemoryArticleRepository::new();
    let service = service_with(&repo, Arc::new(FailingCache));

    let created = service.create(fields("Resilient"), 1).await.unwrap();
    service.update(&created.slug, fields("Still here"), 1).await.unwrap();
    service.delete(&created.slug).await.unwrap();

    let err = service.listing().await.unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_store_outage_leaves_cache_empty() {
    let (service, repo, cache) = service();
    repo.set_unavailable(true);

    let err = service.listing().await.unwrap_err();

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_articles_by_owner() {
    let (service, _, _) = service();
    service.create(fields("A"), 1).await.unwrap();
    service.create(fields("B"), 2).await.unwrap();
    service.create(fields("C"), 1).await.unwrap();

    let mine = service.articles_by_owner(1).await.unwrap();
    let titles: Vec<_> = mine.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["A", "C"]);
}
