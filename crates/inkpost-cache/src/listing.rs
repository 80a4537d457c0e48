//! Read-through cache for the serialized article listing.
//!
//! The cache slot holds either nothing or the exact payload produced by the
//! last populate. `invalidate` is a plain delete with no version stamp.
//!
//! Populate and invalidate are not fenced against each other. If a loader
//! reads the store, a writer then commits and invalidates, and only then the
//! loader's `set` lands, the pre-write snapshot stays cached until the next
//! invalidation.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::backend::{CacheBackend, CacheError};

/// Where a listing payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Cache,
    Store,
}

impl ListingSource {
    pub fn is_hit(self) -> bool {
        matches!(self, ListingSource::Cache)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub payload: String,
    pub source: ListingSource,
}

#[derive(Clone)]
pub struct ListingCache {
    backend: Arc<dyn CacheBackend>,
    key: String,
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl ListingCache {
    pub fn new(backend: Arc<dyn CacheBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cached payload, or runs `loader`, stores its result with no
    /// expiry and returns it.
    ///
    /// On a hit `loader` is never called. Backend errors on either the read or
    /// the write are returned to the caller.
    #[instrument(skip(self, loader), fields(cache.key = %self.key))]
    pub async fn get_or_populate<F, Fut, E>(&self, loader: F) -> Result<Listing, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: From<CacheError>,
    {
        if let Some(payload) = self.backend.get(&self.key).await? {
            debug!("Listing served from cache");
            return Ok(Listing {
                payload,
                source: ListingSource::Cache,
            });
        }

        let payload = loader().await?;
        self.backend.set(&self.key, &payload).await?;

        debug!(cache.bytes = payload.len(), "Listing cache populated");

        Ok(Listing {
            payload,
            source: ListingSource::Store,
        })
    }

    /// Drops the cached listing. Returns whether an entry was present.
    #[instrument(skip(self), fields(cache.key = %self.key))]
    pub async fn invalidate(&self) -> Result<bool, CacheError> {
        self.backend.delete(&self.key).await
    }

    pub async fn is_populated(&self) -> Result<bool, CacheError> {
        self.backend.exists(&self.key).await
    }
}
