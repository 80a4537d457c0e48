pub mod controller;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryArticleRepository;
pub use repository::{ArticleRepository, PgArticleRepository, RepositoryError};
pub use router::init_articles_router;
pub use service::{ArticleService, MAX_INSERT_ATTEMPTS};
