//! Time-boxed caching in front of a provider.

use crate::error::DataError;
use crate::provider::{BoundsProvider, HistoryProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use yield_safety_domain::entities::{PriceBounds, PriceSeries, Token};

/// Default lifetime of a cached entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Wraps a provider and reuses its answers for `ttl`.
///
/// Bounds are keyed by token and confidence level, histories by token and
/// day count. Failures are never cached. Expired entries are dropped
/// whenever a new one is stored.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    bounds: RwLock<HashMap<(String, u64), Entry<PriceBounds>>>,
    history: RwLock<HashMap<(String, u32), Entry<PriceSeries>>>,
}

impl<P> CachedProvider<P> {
    /// Creates a cache with the default TTL.
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            bounds: RwLock::new(HashMap::new()),
            history: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every cached entry.
    pub async fn clear(&self) {
        self.bounds.write().await.clear();
        self.history.write().await.clear();
    }
}

#[async_trait]
impl<P: BoundsProvider> BoundsProvider for CachedProvider<P> {
    async fn get_bounds(&self, token: &Token, confidence_level: f64) -> Result<PriceBounds, DataError> {
        let key = (token.symbol.clone(), confidence_level.to_bits());
        let cached = self
            .bounds
            .read()
            .await
            .get(&key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone());
        if let Some(bounds) = cached {
            debug!(token = %token, "Bounds cache hit");
            return Ok(bounds);
        }

        let bounds = self.inner.get_bounds(token, confidence_level).await?;
        let mut entries = self.bounds.write().await;
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        entries.insert(key, Entry::new(bounds.clone()));
        Ok(bounds)
    }
}

#[async_trait]
impl<P: HistoryProvider> HistoryProvider for CachedProvider<P> {
    async fn get_history(&self, token: &Token, days: u32) -> Result<PriceSeries, DataError> {
        let key = (token.symbol.clone(), days);
        let cached = self
            .history
            .read()
            .await
            .get(&key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone());
        if let Some(series) = cached {
            debug!(token = %token, days, "History cache hit");
            return Ok(series);
        }

        let series = self.inner.get_history(token, days).await?;
        let mut entries = self.history.write().await;
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        entries.insert(key, Entry::new(series.clone()));
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryMarketData;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use yield_safety_domain::value_objects::Price;

    struct CountingProvider {
        calls: AtomicUsize,
        store: InMemoryMarketData,
    }

    #[async_trait]
    impl BoundsProvider for CountingProvider {
        async fn get_bounds(&self, token: &Token, confidence_level: f64) -> Result<PriceBounds, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.store.get_bounds(token, confidence_level).await
        }
    }

    fn counting() -> CountingProvider {
        let bounds = PriceBounds::new(
            Price::new(dec!(2)),
            Price::new(dec!(1.8)),
            Price::new(dec!(2.3)),
            55.0,
        );
        CountingProvider {
            calls: AtomicUsize::new(0),
            store: InMemoryMarketData::new().with_bounds(&Token::new("sol"), bounds),
        }
    }

    #[tokio::test]
    async fn test_reuses_fresh_entries() {
        let cache = CachedProvider::new(counting());
        let sol = Token::new("sol");

        cache.get_bounds(&sol, 0.8).await.unwrap();
        cache.get_bounds(&sol, 0.8).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);

        // different confidence level is a different key
        cache.get_bounds(&sol, 0.95).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);

        cache.clear().await;
        cache.get_bounds(&sol, 0.8).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let cache = CachedProvider::with_ttl(counting(), Duration::ZERO);
        let sol = Token::new("sol");
        cache.get_bounds(&sol, 0.8).await.unwrap();
        cache.get_bounds(&sol, 0.8).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_entries_are_pruned_on_insert() {
        let cache = CachedProvider::with_ttl(counting(), Duration::ZERO);
        let sol = Token::new("sol");
        for i in 0..50 {
            let confidence = 0.5 + f64::from(i) / 100.0;
            cache.get_bounds(&sol, confidence).await.unwrap();
        }
        assert_eq!(cache.bounds.read().await.len(), 1);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn test_fresh_entries_survive_pruning() {
        let cache = CachedProvider::new(counting());
        let sol = Token::new("sol");
        cache.get_bounds(&sol, 0.8).await.unwrap();
        cache.get_bounds(&sol, 0.9).await.unwrap();
        assert_eq!(cache.bounds.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = CachedProvider::new(counting());
        let missing = Token::new("pengu");
        assert!(cache.get_bounds(&missing, 0.8).await.is_err());
        assert!(cache.get_bounds(&missing, 0.8).await.is_err());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }
}
