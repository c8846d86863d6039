//! Generic get-or-set response cache.
//!
//! A thin wrapper over `moka` used in front of read-heavy computed
//! responses (currently the leaderboard). Values are cached per key with a
//! TTL; `get_or_compute` returns the cached value when fresh and otherwise
//! runs the supplied fill and stores its result.

use std::time::Duration;

use moka::sync::Cache;

/// Configuration for a response cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in cache
    pub max_entries: u64,
    /// TTL for cache entries (in seconds)
    pub ttl_secs: u64,
    /// Enable cache (can be disabled for testing)
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1_024, ttl_secs: 60, enabled: true }
    }
}

impl CacheConfig {
    /// Create a cache config with custom settings
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        Self { max_entries, ttl_secs, enabled: true }
    }

    /// Create a disabled cache config
    pub fn disabled() -> Self {
        Self { max_entries: 0, ttl_secs: 0, enabled: false }
    }
}

/// TTL-bounded get-or-set cache for computed responses
///
/// Cheap to clone; clones share the underlying cache.
#[derive(Clone)]
pub struct ResponseCache<V: Clone + Send + Sync + 'static> {
    cache: Option<Cache<String, V>>,
}

impl<V: Clone + Send + Sync + 'static> ResponseCache<V> {
    /// Build a cache from configuration
    pub fn new(config: &CacheConfig) -> Self {
        let cache = config.enabled.then(|| {
            Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(Duration::from_secs(config.ttl_secs))
                .build()
        });
        Self { cache }
    }

    /// Return the cached value for `key`, or compute, store and return it
    ///
    /// Errors from `compute` are returned without being cached, so a failed
    /// fill is retried on the next call.
    pub async fn get_or_compute<E, Fut>(
        &self,
        key: &str,
        compute: impl FnOnce() -> Fut,
    ) -> Result<V, E>
    where
        Fut: Future<Output = Result<V, E>>,
    {
        let Some(cache) = &self.cache else {
            return compute().await;
        };

        if let Some(hit) = cache.get(key) {
            tracing::trace!(key, "response cache hit");
            return Ok(hit);
        }

        let value = compute().await?;
        cache.insert(key.to_string(), value.clone());
        tracing::trace!(key, "response cache fill");
        Ok(value)
    }

    /// Drop every cached entry
    ///
    /// Called after writes that change the cached computation's inputs.
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    async fn fill(
        cache: &ResponseCache<i32>,
        key: &str,
        value: i32,
    ) -> Result<i32, Infallible> {
        cache.get_or_compute(key, || async move { Ok(value) }).await
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache: ResponseCache<i32> = ResponseCache::new(&CacheConfig::new(16, 60));

        assert_eq!(fill(&cache, "k", 1).await.unwrap(), 1);
        // Different compute result is ignored while the entry is fresh
        assert_eq!(fill(&cache, "k", 2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache: ResponseCache<i32> = ResponseCache::new(&CacheConfig::new(16, 60));

        assert_eq!(fill(&cache, "a", 1).await.unwrap(), 1);
        assert_eq!(fill(&cache, "b", 2).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_recompute() {
        let cache: ResponseCache<i32> = ResponseCache::new(&CacheConfig::new(16, 60));

        assert_eq!(fill(&cache, "k", 1).await.unwrap(), 1);
        cache.invalidate_all();
        assert_eq!(fill(&cache, "k", 2).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_computes() {
        let cache: ResponseCache<i32> = ResponseCache::new(&CacheConfig::disabled());

        assert_eq!(fill(&cache, "k", 1).await.unwrap(), 1);
        assert_eq!(fill(&cache, "k", 2).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_compute_errors_are_not_cached() {
        let cache: ResponseCache<i32> = ResponseCache::new(&CacheConfig::new(16, 60));

        let failed: Result<i32, &str> =
            cache.get_or_compute("k", || async { Err("boom") }).await;
        assert!(failed.is_err());

        // Next call retries and succeeds
        let value: Result<i32, &str> = cache.get_or_compute("k", || async { Ok(3) }).await;
        assert_eq!(value.unwrap(), 3);
    }
}
