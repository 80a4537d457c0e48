//! # Inkpost Cache
//!
//! Key/value caching for the Inkpost API.
//!
//! This crate provides:
//! - The [`CacheBackend`] trait with Redis and in-process implementations
//! - Cache configuration from environment variables
//! - Cache key generation
//! - [`ListingCache`], the read-through cache for the article listing
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use inkpost_cache::{CacheConfig, ListingCache, RedisCache, keys};
//!
//! let config = CacheConfig::from_env();
//! let backend = Arc::new(RedisCache::new(&config.redis_url).await?);
//! let listing = ListingCache::new(backend, keys::articles::listing(&config.key_prefix));
//!
//! let page = listing.get_or_populate(|| async { load_listing().await }).await?;
//! listing.invalidate().await?;
//! ```

pub mod backend;
pub mod config;
pub mod keys;
pub mod listing;
pub mod memory;
pub mod redis;

pub use backend::{CacheBackend, CacheError};
pub use config::CacheConfig;
pub use listing::{Listing, ListingCache, ListingSource};
pub use memory::InMemoryCache;
pub use self::redis::RedisCache;
