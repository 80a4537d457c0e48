//! Cache configuration.

use std::env;

/// Cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: Prefix for all cache keys (default: `inkpost`)
///
/// There is no TTL: entries live until they are invalidated.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub redis_url: String,

    /// Prefix for all cache keys to avoid collisions.
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "inkpost".into()),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "inkpost".into(),
        }
    }
}
