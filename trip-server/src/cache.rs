//! Caching layer for routing provider responses.
//!
//! Distances are keyed by waypoints quantised to micro-degrees. Autocomplete
//! results are keyed by the trimmed, lowercased query.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use rust_decimal::Decimal;
use tracing::trace;

use crate::domain::{Coordinates, NamedLocation};
use crate::routing::{RouteProvider, RoutingError};

/// Cache key for distances: waypoints in micro-degrees, in order.
type DistanceKey = Vec<(i64, i64)>;

/// Cached autocomplete entry.
type SuggestionEntry = Arc<Vec<NamedLocation>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Route provider with caching.
///
/// Wraps any `RouteProvider` and caches successful distance and
/// autocomplete responses. Errors are passed through and never cached.
pub struct CachedRouteProvider<P> {
    inner: P,
    distances: MokaCache<DistanceKey, Decimal>,
    suggestions: MokaCache<String, SuggestionEntry>,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            distances: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            suggestions: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Access the underlying provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.distances.invalidate_all();
        self.suggestions.invalidate_all();
    }
}

/// Case- and whitespace-insensitive form of a query.
fn normalize_query(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    async fn driving_distance(&self, waypoints: &[Coordinates]) -> Result<Decimal, RoutingError> {
        let key: DistanceKey = waypoints.iter().map(Coordinates::micro_degrees).collect();

        if let Some(miles) = self.distances.get(&key).await {
            trace!(waypoints = waypoints.len(), "distance cache hit");
            return Ok(miles);
        }

        let miles = self.inner.driving_distance(waypoints).await?;
        self.distances.insert(key, miles).await;
        Ok(miles)
    }

    async fn geocode(&self, text: &str) -> Result<Option<NamedLocation>, RoutingError> {
        self.inner.geocode(text).await
    }

    async fn autocomplete(&self, text: &str) -> Result<Vec<NamedLocation>, RoutingError> {
        let key = normalize_query(text);

        if let Some(cached) = self.suggestions.get(&key).await {
            trace!(query = %key, "autocomplete cache hit");
            return Ok(cached.as_ref().clone());
        }

        let locations = self.inner.autocomplete(text).await?;
        self.suggestions
            .insert(key, Arc::new(locations.clone()))
            .await;
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::FixedRouteProvider;
    use rust_decimal_macros::dec;

    fn coords(lon: f64, lat: f64) -> Coordinates {
        Coordinates::new(lon, lat).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn query_normalization() {
        assert_eq!(normalize_query("  Den   Ver "), "den ver");
        assert_eq!(normalize_query("DENVER"), normalize_query("denver"));
    }

    #[tokio::test]
    async fn repeated_distance_hits_cache() {
        let fixed = FixedRouteProvider::new().with_fixed_miles(dec!(300));
        let cached = CachedRouteProvider::new(fixed, &CacheConfig::default());
        let route = [coords(-87.63, 41.88), coords(-104.99, 39.74)];

        assert_eq!(cached.driving_distance(&route).await.unwrap(), dec!(300));
        assert_eq!(cached.driving_distance(&route).await.unwrap(), dec!(300));
        assert_eq!(cached.inner().distance_calls(), 1);
    }

    #[tokio::test]
    async fn nearby_noise_shares_an_entry() {
        let fixed = FixedRouteProvider::new().with_fixed_miles(dec!(300));
        let cached = CachedRouteProvider::new(fixed, &CacheConfig::default());

        let a = [coords(-87.63, 41.88), coords(-104.99, 39.74)];
        let b = [coords(-87.630_000_01, 41.88), coords(-104.99, 39.740_000_02)];
        cached.driving_distance(&a).await.unwrap();
        cached.driving_distance(&b).await.unwrap();

        assert_eq!(cached.inner().distance_calls(), 1);
    }

    #[tokio::test]
    async fn waypoint_order_matters() {
        let fixed = FixedRouteProvider::new().with_fixed_miles(dec!(300));
        let cached = CachedRouteProvider::new(fixed, &CacheConfig::default());

        let a = coords(-87.63, 41.88);
        let b = coords(-104.99, 39.74);
        cached.driving_distance(&[a, b]).await.unwrap();
        cached.driving_distance(&[b, a]).await.unwrap();

        assert_eq!(cached.inner().distance_calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let fixed = FixedRouteProvider::new().failing_with(500);
        let cached = CachedRouteProvider::new(fixed, &CacheConfig::default());
        let route = [coords(0.0, 0.0), coords(1.0, 1.0)];

        assert!(cached.driving_distance(&route).await.is_err());
        assert!(cached.driving_distance(&route).await.is_err());
        assert_eq!(cached.inner().distance_calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let fixed = FixedRouteProvider::new().with_fixed_miles(dec!(10));
        let cached = CachedRouteProvider::new(fixed, &CacheConfig::default());
        let route = [coords(0.0, 0.0), coords(1.0, 1.0)];

        cached.driving_distance(&route).await.unwrap();
        cached.invalidate_all();
        cached.driving_distance(&route).await.unwrap();

        assert_eq!(cached.inner().distance_calls(), 2);
    }

    #[tokio::test]
    async fn autocomplete_is_cached_by_normalized_query() {
        let cached =
            CachedRouteProvider::new(FixedRouteProvider::with_us_hubs(), &CacheConfig::default());

        let first = cached.autocomplete("Den").await.unwrap();
        let second = cached.autocomplete("  den ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].name, "Denver, CO, USA");
    }
}
