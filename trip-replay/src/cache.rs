//! Caching layer for route lookups.
//!
//! Persisted routes change rarely, so listings and individual routes are
//! kept for a short TTL. A stale entry is served until it expires; a fetch
//! failure is never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::api::ApiError;
use crate::domain::{Route, RouteId};
use crate::driver::RouteSource;

/// Cached route listing.
type ListEntry = Arc<Vec<Route>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Route source with caching.
///
/// Wraps any [`RouteSource`] and caches both the listing and routes by id.
/// A listing also warms the by-id cache.
pub struct CachedRouteSource<S> {
    source: S,
    listing: MokaCache<(), ListEntry>,
    routes: MokaCache<RouteId, Route>,
}

impl<S: RouteSource> CachedRouteSource<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let listing = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            source,
            listing,
            routes,
        }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.listing.invalidate_all();
        self.routes.invalidate_all();
    }
}

impl<S> RouteSource for CachedRouteSource<S>
where
    S: RouteSource + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Route>, ApiError> {
        if let Some(cached) = self.listing.get(&()).await {
            debug!(routes = cached.len(), "route listing served from cache");
            return Ok(cached.as_ref().clone());
        }

        let routes = self.source.list().await?;

        for route in &routes {
            self.routes.insert(route.id.clone(), route.clone()).await;
        }
        self.listing.insert((), Arc::new(routes.clone())).await;

        Ok(routes)
    }

    async fn get(&self, id: &RouteId) -> Result<Route, ApiError> {
        if let Some(cached) = self.routes.get(id).await {
            debug!(route = %id, "route served from cache");
            return Ok(cached);
        }

        let route = self.source.get(id).await?;
        self.routes.insert(id.clone(), route.clone()).await;

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::fixtures::{route_id, scenario_route};

    /// Source that counts fetches and can be switched to failing.
    #[derive(Default)]
    struct CountingSource {
        lists: AtomicUsize,
        gets: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl RouteSource for CountingSource {
        async fn list(&self) -> Result<Vec<Route>, ApiError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            Ok(vec![scenario_route("r1"), scenario_route("r2")])
        }

        async fn get(&self, id: &RouteId) -> Result<Route, ApiError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Api {
                    status: 500,
                    message: "down".into(),
                });
            }
            Ok(scenario_route(id.as_str()))
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn get_is_cached() {
        let cached = CachedRouteSource::new(CountingSource::default(), &CacheConfig::default());

        let first = cached.get(&route_id("r1")).await.unwrap();
        let second = cached.get(&route_id("r1")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.source().gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn listing_warms_routes() {
        let cached = CachedRouteSource::new(CountingSource::default(), &CacheConfig::default());

        assert_eq!(cached.list().await.unwrap().len(), 2);
        assert_eq!(cached.list().await.unwrap().len(), 2);
        assert_eq!(cached.source().lists.load(Ordering::SeqCst), 1);

        cached.get(&route_id("r2")).await.unwrap();
        assert_eq!(cached.source().gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failures_not_cached() {
        let source = CountingSource::default();
        source.fail.store(true, Ordering::SeqCst);
        let cached = CachedRouteSource::new(source, &CacheConfig::default());

        assert!(cached.get(&route_id("r1")).await.is_err());

        cached.source().fail.store(false, Ordering::SeqCst);
        assert!(cached.get(&route_id("r1")).await.is_ok());
        assert_eq!(cached.source().gets.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedRouteSource::new(CountingSource::default(), &CacheConfig::default());

        cached.get(&route_id("r1")).await.unwrap();
        cached.invalidate_cache();
        cached.get(&route_id("r1")).await.unwrap();

        assert_eq!(cached.source().gets.load(Ordering::SeqCst), 2);
    }
}
