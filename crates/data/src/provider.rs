use crate::error::DataError;
use async_trait::async_trait;
use std::sync::Arc;
use yield_safety_domain::entities::{PriceBounds, PriceSeries, Token};

/// Source of per-token forecast bounds.
///
/// Implementations must fail rather than return partial bounds.
#[async_trait]
pub trait BoundsProvider: Send + Sync {
    /// Forecast bounds for `token` at the given confidence level (0 to 1).
    async fn get_bounds(&self, token: &Token, confidence_level: f64) -> Result<PriceBounds, DataError>;
}

/// Source of per-token price history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Daily history covering the last `days` days, oldest first.
    async fn get_history(&self, token: &Token, days: u32) -> Result<PriceSeries, DataError>;
}

#[async_trait]
impl<T: BoundsProvider + ?Sized> BoundsProvider for Arc<T> {
    async fn get_bounds(&self, token: &Token, confidence_level: f64) -> Result<PriceBounds, DataError> {
        (**self).get_bounds(token, confidence_level).await
    }
}

#[async_trait]
impl<T: HistoryProvider + ?Sized> HistoryProvider for Arc<T> {
    async fn get_history(&self, token: &Token, days: u32) -> Result<PriceSeries, DataError> {
        (**self).get_history(token, days).await
    }
}
