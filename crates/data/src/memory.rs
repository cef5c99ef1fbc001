//! Market data held in memory, for tests and embedding callers.

use crate::error::DataError;
use crate::provider::{BoundsProvider, HistoryProvider};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use yield_safety_domain::entities::{PriceBounds, PricePoint, PriceSeries, Token};
use yield_safety_domain::value_objects::Price;

/// Bounds and histories keyed by token symbol.
///
/// The same bounds are returned for every confidence level.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    bounds: RwLock<HashMap<String, PriceBounds>>,
    history: RwLock<HashMap<String, PriceSeries>>,
}

impl InMemoryMarketData {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bounds(mut self, token: &Token, bounds: PriceBounds) -> Self {
        self.bounds.get_mut().insert(token.symbol.clone(), bounds);
        self
    }

    #[must_use]
    pub fn with_history(mut self, token: &Token, series: PriceSeries) -> Self {
        self.history.get_mut().insert(token.symbol.clone(), series);
        self
    }

    pub async fn insert_bounds(&self, token: &Token, bounds: PriceBounds) {
        self.bounds.write().await.insert(token.symbol.clone(), bounds);
    }

    pub async fn insert_history(&self, token: &Token, series: PriceSeries) {
        self.history.write().await.insert(token.symbol.clone(), series);
    }

    pub async fn remove(&self, token: &Token) {
        self.bounds.write().await.remove(&token.symbol);
        self.history.write().await.remove(&token.symbol);
    }
}

#[async_trait]
impl BoundsProvider for InMemoryMarketData {
    async fn get_bounds(&self, token: &Token, _confidence_level: f64) -> Result<PriceBounds, DataError> {
        self.bounds
            .read()
            .await
            .get(&token.symbol)
            .cloned()
            .ok_or_else(|| DataError::not_found(&token.symbol))
    }
}

#[async_trait]
impl HistoryProvider for InMemoryMarketData {
    async fn get_history(&self, token: &Token, days: u32) -> Result<PriceSeries, DataError> {
        let guard = self.history.read().await;
        let series = guard
            .get(&token.symbol)
            .ok_or_else(|| DataError::not_found(&token.symbol))?;
        debug!(token = %token, days, available = series.len(), "Serving history from memory");
        Ok(series.tail(days as usize + 1))
    }
}

/// Builds a series of daily closes whose last point falls on `end`.
pub fn daily_series(end: DateTime<Utc>, closes: &[f64]) -> Result<PriceSeries, DataError> {
    let count = closes.len() as i64;
    let mut points = Vec::with_capacity(closes.len());
    for (i, close) in closes.iter().enumerate() {
        let at = end - TimeDelta::days(count - 1 - i as i64);
        let timestamp = u64::try_from(at.timestamp()).map_err(|_| DataError::InvalidTimestamp(at.timestamp()))?;
        points.push(PricePoint::new(timestamp, Price::from_f64(*close)?));
    }
    Ok(PriceSeries::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn bounds() -> PriceBounds {
        PriceBounds::new(
            Price::new(dec!(1.0)),
            Price::new(dec!(0.9)),
            Price::new(dec!(1.1)),
            70.0,
        )
    }

    #[tokio::test]
    async fn test_missing_token_is_not_found() {
        let store = InMemoryMarketData::new();
        let err = store.get_bounds(&Token::new("sol"), 0.8).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { token } if token == "sol"));
    }

    #[tokio::test]
    async fn test_lookup_ignores_symbol_case() {
        let store = InMemoryMarketData::new().with_bounds(&Token::new("USDC"), bounds());
        let found = store.get_bounds(&Token::new("usdc"), 0.9).await.unwrap();
        assert_eq!(found, bounds());
    }

    #[tokio::test]
    async fn test_history_is_truncated_to_requested_days() {
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let token = Token::new("jup");
        let store = InMemoryMarketData::new();
        store.insert_history(&token, daily_series(end, &closes).unwrap()).await;

        let series = store.get_history(&token, 30).await.unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(series.prices().last().copied(), Some(159.0));

        store.remove(&token).await;
        assert!(store.get_history(&token, 30).await.is_err());
    }

    #[test]
    fn test_daily_series_ends_on_given_date() {
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let series = daily_series(end, &[1.0, 2.0, 3.0]).unwrap();
        let points = series.points();
        assert_eq!(points[2].timestamp, end.timestamp() as u64);
        assert_eq!(points[2].timestamp - points[0].timestamp, 2 * 86_400);
    }
}
