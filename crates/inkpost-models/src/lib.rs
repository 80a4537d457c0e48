//! # Inkpost Models
//!
//! Domain models and DTOs for the Inkpost API.
//!
//! - [`articles`]: article records, listing entries and create/update payloads
//! - [`users`]: user accounts and profile responses
//! - [`auth`]: register and login payloads
//!
//! # Example
//!
//! ```ignore
//! use inkpost_models::{ArticleFields, CreateArticleDto};
//!
//! let fields: ArticleFields = dto.into();
//! ```

pub mod articles;
pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use articles::{
    Article, ArticleFields, ArticleWithOwner, CreateArticleDto, NewArticle, UpdateArticleDto,
};
pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};
pub use users::{ProfileResponse, User};
