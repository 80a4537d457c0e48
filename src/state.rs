use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tracing::{info, warn};

use inkpost_auth::TokenAuthenticator;
use inkpost_cache::{CacheBackend, CacheConfig, InMemoryCache, ListingCache, RedisCache, keys};
use inkpost_config::{CorsConfig, JwtConfig};
use inkpost_db::init_db_pool;

use crate::modules::articles::{ArticleRepository, ArticleService, PgArticleRepository};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub authenticator: TokenAuthenticator,
    pub articles: ArticleService,
}

impl AppState {
    /// Assembles state from already constructed collaborators.
    ///
    /// # Errors
    ///
    /// Fails if `jwt_config` names an algorithm other than HS256/HS384/HS512.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        repository: Arc<dyn ArticleRepository>,
        cache: Arc<dyn CacheBackend>,
        cache_prefix: &str,
    ) -> anyhow::Result<Self> {
        let authenticator = TokenAuthenticator::from_config(&jwt_config)
            .context("Invalid JWT configuration")?;
        let listing = ListingCache::new(cache, keys::articles::listing(cache_prefix));

        Ok(Self {
            db,
            jwt_config,
            cors_config,
            authenticator,
            articles: ArticleService::new(repository, listing),
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool()
        .await
        .context("Failed to connect to the database")?;
    let cache_config = CacheConfig::from_env();
    let cache = init_cache(&cache_config).await;
    let repository = Arc::new(PgArticleRepository::new(db.clone()));

    AppState::new(
        db,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        repository,
        cache,
        &cache_config.key_prefix,
    )
}

/// Connects to Redis, falling back to a process-local cache when it is unreachable.
async fn init_cache(config: &CacheConfig) -> Arc<dyn CacheBackend> {
    match RedisCache::new(&config.redis_url).await {
        Ok(cache) => {
            info!("Connected to Redis");
            Arc::new(cache)
        }
        Err(e) => {
            warn!(error = %e, "Redis unavailable, using in-process listing cache");
            Arc::new(InMemoryCache::new())
        }
    }
}
