mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;

use common::{LISTING_KEY, bearer, body_json, empty_request, json_request, test_app};
use inkpost_auth::Role;
use inkpost_cache::CacheBackend;

fn article_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Seekor tupai terbang di atas pohon.",
        "tag": "fiction"
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app
        .router
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = test_app();
    let response = app
        .router
        .oneshot(json_request("POST", "/api/v1/article", None, article_body("x")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_create_returns_article() {
    let app = test_app();
    let auth = bearer(5, Role::Member);
    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&auth),
            article_body("Tupai terbang"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["slug"], "tupai-terbang");
    assert_eq!(body["owner_id"], 5);
}

#[tokio::test]
async fn test_create_validates_body() {
    let app = test_app();
    let auth = bearer(5, Role::Member);

    let empty_title = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&auth),
            article_body(""),
        ))
        .await
        .unwrap();
    assert_eq!(empty_title.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let missing_tag = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&auth),
            json!({ "title": "t", "description": "d" }),
        ))
        .await
        .unwrap();
    assert_eq!(missing_tag.status(), StatusCode::BAD_REQUEST);
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_get_article_is_public() {
    let app = test_app();
    app.state
        .articles
        .create(
            inkpost_models::ArticleFields {
                title: "Open".to_string(),
                description: "d".to_string(),
                tag: "t".to_string(),
            },
            1,
        )
        .await
        .unwrap();

    let found = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/article/open", None))
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_json(found).await["title"], "Open");

    let missing = app
        .router
        .oneshot(empty_request("GET", "/api/v1/article/closed", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_requires_token_and_reports_cache_status() {
    let app = test_app();

    let anonymous = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/article", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert!(app.cache.is_empty().await);

    let auth = bearer(5, Role::Member);
    let first = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/article", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert_eq!(first.headers()["content-type"], "application/json");
    assert_eq!(body_json(first).await, json!([]));

    let second = app
        .router
        .oneshot(empty_request("GET", "/api/v1/article", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(second.headers()["x-cache"], "HIT");
}

#[tokio::test]
async fn test_update_by_other_member_is_forbidden() {
    let app = test_app();
    let owner = bearer(1, Role::Member);
    let intruder = bearer(2, Role::Member);

    app.router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&owner),
            article_body("Private thoughts"),
        ))
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/v1/article/private-thoughts",
            Some(&intruder),
            article_body("Defaced"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 403);
    assert_eq!(body["message"], "Data is forbidden");
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let app = test_app();
    let owner = bearer(1, Role::Member);
    let admin = bearer(99, Role::Admin);

    app.router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&owner),
            article_body("Short lived"),
        ))
        .await
        .unwrap();

    let by_owner = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/article/short-lived", Some(&owner)))
        .await
        .unwrap();
    assert_eq!(by_owner.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.repo.len().await, 1);

    let by_admin = app
        .router
        .oneshot(empty_request("DELETE", "/api/v1/article/short-lived", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(by_admin.status(), StatusCode::OK);
    assert_eq!(
        body_json(by_admin).await["message"],
        "Article Short lived deleted successfully"
    );
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_tupai_terbang_walkthrough() {
    let app = test_app();
    let ayu = bearer(1, Role::Member);
    let budi = bearer(2, Role::Member);
    let admin = bearer(3, Role::Admin);
    app.repo.set_owner_name(1, "Ayu").await;

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&ayu),
            article_body("Tupai terbang"),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let listing = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/article", Some(&budi)))
        .await
        .unwrap();
    let entries = body_json(listing).await;
    assert_eq!(entries[0]["slug"], "tupai-terbang");
    assert_eq!(entries[0]["owner_name"], "Ayu");
    assert!(app.cache.exists(LISTING_KEY).await.unwrap());

    let before = Utc::now().timestamp();
    let duplicate = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            Some(&ayu),
            article_body("Tupai terbang"),
        ))
        .await
        .unwrap();
    let after = Utc::now().timestamp();
    assert_eq!(duplicate.status(), StatusCode::CREATED);
    let duplicate = body_json(duplicate).await;
    let duplicate_slug = duplicate["slug"].as_str().unwrap().to_string();
    let stamp: i64 = duplicate_slug
        .strip_prefix("tupai-terbang")
        .unwrap()
        .parse()
        .unwrap();
    assert!(stamp >= before && stamp <= after);
    assert_eq!(duplicate["owner_id"], 1);
    assert!(!app.cache.exists(LISTING_KEY).await.unwrap());

    let hijack = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/article/tupai-terbang",
            Some(&budi),
            article_body("Tupai jatuh"),
        ))
        .await
        .unwrap();
    assert_eq!(hijack.status(), StatusCode::FORBIDDEN);

    let removed = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/article/tupai-terbang", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(removed.status(), StatusCode::OK);

    let listing = app
        .router
        .oneshot(empty_request("GET", "/api/v1/article", Some(&ayu)))
        .await
        .unwrap();
    assert_eq!(listing.headers()["x-cache"], "MISS");
    let entries = body_json(listing).await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["slug"], duplicate_slug.as_str());
}
