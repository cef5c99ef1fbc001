//! Chronological price history for a single token.

use crate::error::DomainError;
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

/// One observation in a price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    pub price: Price,
}

impl PricePoint {
    pub fn new(timestamp: u64, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// Price history ordered by timestamp, with unique timestamps and positive prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, rejecting out-of-order or duplicate timestamps and
    /// non-positive prices.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DomainError> {
        for (index, window) in points.windows(2).enumerate() {
            if window[1].timestamp <= window[0].timestamp {
                return Err(DomainError::UnorderedSeries { index: index + 1 });
            }
        }
        for point in &points {
            point.price.ensure_positive("price")?;
        }
        Ok(Self { points })
    }

    /// Builds a series from evenly spaced closing prices.
    pub fn from_closes(start_timestamp: u64, step_secs: u64, closes: &[f64]) -> Result<Self, DomainError> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                Price::from_f64(*close)
                    .map(|price| PricePoint::new(start_timestamp + i as u64 * step_secs, price))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent `n` points (or all of them if the series is shorter).
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let start = self.points.len().saturating_sub(n);
        Self {
            points: self.points[start..].to_vec(),
        }
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price.as_f64()).collect()
    }

    /// Simple percentage returns `p_t / p_{t-1} - 1`; one shorter than the series.
    pub fn simple_returns(&self) -> Vec<f64> {
        self.prices().windows(2).map(|w| w[1] / w[0] - 1.0).collect()
    }

    /// Log returns `ln(p_t / p_{t-1})`; one shorter than the series.
    pub fn log_returns(&self) -> Vec<f64> {
        self.prices().windows(2).map(|w| (w[1] / w[0]).ln()).collect()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = DomainError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
