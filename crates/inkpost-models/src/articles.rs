//! Article domain models and DTOs.
//!
//! [`Article`] is the stored record. `slug` and `owner_id` are fixed at
//! creation; only the fields in [`ArticleFields`] change afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tag: String,
    #[schema(example = "tupai-terbang")]
    pub slug: String,
    #[sqlx(rename = "user_id")]
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry: an article plus its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ArticleWithOwner {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub article: Article,
    pub owner_name: Option<String>,
}

/// The mutable part of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleFields {
    pub title: String,
    pub description: String,
    pub tag: String,
}

/// A fully resolved article ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub tag: String,
    pub slug: String,
    pub owner_id: i64,
}

impl NewArticle {
    pub fn new(fields: ArticleFields, slug: String, owner_id: i64) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            tag: fields.tag,
            slug,
            owner_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArticleDto {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Tupai terbang")]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    #[schema(example = "fiction")]
    pub tag: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub tag: String,
}

impl From<CreateArticleDto> for ArticleFields {
    fn from(dto: CreateArticleDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            tag: dto.tag,
        }
    }
}

impl From<UpdateArticleDto> for ArticleFields {
    fn from(dto: UpdateArticleDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            tag: dto.tag,
        }
    }
}
