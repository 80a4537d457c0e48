use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use inkpost_core::{AppError, ErrorResponse};
use inkpost_models::{
    Article, ArticleWithOwner, CreateArticleDto, MessageResponse, UpdateArticleDto,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/article",
    responses(
        (status = 200, description = "Every article in creation order", body = Vec<ArticleWithOwner>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Invalid token", body = ErrorResponse)
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
pub async fn list_articles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let listing = state.articles.listing().await?;
    let cache_status = if listing.source.is_hit() { "HIT" } else { "MISS" };

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (HeaderName::from_static("x-cache"), HeaderValue::from_static(cache_status)),
        ],
        listing.payload,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/article/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article details", body = Article),
        (status = 404, description = "Article not found", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, AppError> {
    let article = state.articles.get_by_slug(&slug).await?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/api/v1/article",
    request_body = CreateArticleDto,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "No unique slug could be allocated", body = ErrorResponse),
        (status = 422, description = "Validation failed or invalid token", body = ErrorResponse)
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
pub async fn create_article(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateArticleDto>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    let article = state.articles.create(dto.into(), identity.user_id).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    put,
    path = "/api/v1/article/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    request_body = UpdateArticleDto,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
pub async fn update_article(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(slug): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateArticleDto>,
) -> Result<Json<Article>, AppError> {
    let article = state
        .articles
        .update(&slug, dto.into(), identity.user_id)
        .await?;
    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/v1/article/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    ),
    tag = "Articles",
    security(("bearer_auth" = []))
)]
pub async fn delete_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let article = state.articles.delete(&slug).await?;
    Ok(Json(MessageResponse::new(format!(
        "Article {} deleted successfully",
        article.title
    ))))
}
