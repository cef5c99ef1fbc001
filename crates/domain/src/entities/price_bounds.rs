//! Forecast price interval for a single token.

use crate::error::DomainError;
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Forecast bounds for one token over the prediction horizon.
///
/// The interval is a forecast and may exclude the current price; only
/// `lower_bound <= upper_bound` is guaranteed once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Spot price at forecast time.
    pub current_price: Price,
    /// Point prediction at the end of the horizon, if the forecaster produced one.
    #[serde(default)]
    pub predicted_price: Option<Price>,
    /// Lower end of the forecast interval.
    pub lower_bound: Price,
    /// Upper end of the forecast interval.
    pub upper_bound: Price,
    /// Interval width relative to the current price, in percent points.
    pub range_width_pct: f64,
    /// Forecaster confidence, 0 to 100.
    pub safety_score: f64,
    /// Model-predicted weekly volatility in percent points.
    #[serde(default)]
    pub lstm_volatility: Option<f64>,
}

impl PriceBounds {
    /// Creates bounds without a point prediction, deriving `range_width_pct`
    /// from the interval and the current price.
    pub fn new(current_price: Price, lower_bound: Price, upper_bound: Price, safety_score: f64) -> Self {
        let range_width_pct = PriceRange::new(lower_bound, upper_bound)
            .width_pct(current_price)
            .to_f64()
            .unwrap_or(0.0);
        Self {
            current_price,
            predicted_price: None,
            lower_bound,
            upper_bound,
            range_width_pct,
            safety_score,
            lstm_volatility: None,
        }
    }

    #[must_use]
    pub fn with_predicted_price(mut self, predicted: Price) -> Self {
        self.predicted_price = Some(predicted);
        self
    }

    #[must_use]
    pub fn with_lstm_volatility(mut self, weekly_pct: f64) -> Self {
        self.lstm_volatility = Some(weekly_pct);
        self
    }

    #[must_use]
    pub fn with_range_width_pct(mut self, range_width_pct: f64) -> Self {
        self.range_width_pct = range_width_pct;
        self
    }

    pub fn range(&self) -> PriceRange {
        PriceRange::new(self.lower_bound, self.upper_bound)
    }

    /// Checks the invariants the scoring pipeline relies on: every price is
    /// positive, the interval is ordered and the safety score lies in `[0, 100]`.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.current_price.ensure_positive("current_price")?;
        self.lower_bound.ensure_positive("lower_bound")?;
        self.upper_bound.ensure_positive("upper_bound")?;
        if let Some(predicted) = self.predicted_price {
            predicted.ensure_positive("predicted_price")?;
        }
        if self.lower_bound > self.upper_bound {
            return Err(DomainError::InvertedBounds {
                lower: self.lower_bound.value,
                upper: self.upper_bound.value,
            });
        }
        if !(0.0..=100.0).contains(&self.safety_score) {
            return Err(DomainError::SafetyScoreOutOfRange(self.safety_score));
        }
        Ok(())
    }
}
