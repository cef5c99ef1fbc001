//! Realized and predicted volatility of a single token.
//!
//! Even when the price ends inside its forecast bounds, large intra-period
//! swings make a liquidity position accumulate more loss.

use serde::{Deserialize, Serialize};
use tracing::debug;
use yield_safety_domain::entities::{PriceBounds, PriceSeries};
use yield_safety_domain::enums::{VolatilityMismatch, VolatilityRisk, VolatilityTrend};
use yield_safety_domain::math::statistics;
use yield_safety_domain::value_objects::{HistoricalVolatility, PairVolatility, VolatilityResult};

/// Volatility reported when the history is too short, in percent points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultVolatility {
    pub daily_pct: f64,
    pub weekly_pct: f64,
    pub annualized_pct: f64,
}

impl Default for DefaultVolatility {
    fn default() -> Self {
        Self {
            daily_pct: 3.0,
            weekly_pct: 7.5,
            annualized_pct: 50.0,
        }
    }
}

/// Configuration for the volatility analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Minimum price points for realized volatility.
    pub min_points: usize,
    /// Returns in the recent window; the trend compares the last two such windows.
    pub recent_days: usize,
    pub defaults: DefaultVolatility,
    /// Volatility score below this is low risk.
    pub low_threshold: f64,
    /// Volatility score below this (and not low) is medium risk.
    pub medium_threshold: f64,
    /// Recent/previous volatility ratio above which the trend is increasing.
    pub trend_up: f64,
    /// Recent/previous volatility ratio below which the trend is decreasing.
    pub trend_down: f64,
    /// Expected swings per week when daily volatility is zero.
    pub default_swings: f64,
    /// Fraction of the weekly/daily volatility ratio counted as swings.
    pub swing_factor: f64,
    /// IL added per swing, as a decimal.
    pub il_per_swing: f64,
    /// Upper limit of the path-dependent IL estimate, as a decimal.
    pub path_il_cap: f64,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            min_points: 5,
            recent_days: 7,
            defaults: DefaultVolatility::default(),
            low_threshold: 80.0,
            medium_threshold: 120.0,
            trend_up: 1.1,
            trend_down: 0.9,
            default_swings: 3.5,
            swing_factor: 0.5,
            il_per_swing: 0.001,
            path_il_cap: 0.05,
        }
    }
}

/// Analyzes volatility to assess risk within price prediction bounds.
#[derive(Debug, Clone, Default)]
pub struct VolatilityAnalyzer {
    config: VolatilityConfig,
}

impl VolatilityAnalyzer {
    /// Creates a new volatility analyzer.
    pub fn new(config: VolatilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VolatilityConfig {
        &self.config
    }

    /// Realized volatility from log returns.
    ///
    /// Daily volatility is the sample standard deviation of log returns,
    /// scaled by `sqrt(7)` and `sqrt(365)` for the weekly and annual figures.
    pub fn calculate_historical_volatility(&self, series: &PriceSeries) -> HistoricalVolatility {
        if series.len() < self.config.min_points {
            debug!(
                points = series.len(),
                "Insufficient data, using default volatility"
            );
            let defaults = self.config.defaults;
            return HistoricalVolatility {
                daily_volatility_pct: defaults.daily_pct,
                weekly_volatility_pct: defaults.weekly_pct,
                recent_volatility_pct: defaults.daily_pct,
                annualized_volatility_pct: defaults.annualized_pct,
                trend: VolatilityTrend::Unknown,
                used_defaults: true,
            };
        }

        let log_returns = series.log_returns();
        let recent = self.config.recent_days;

        let daily_vol = statistics::std_dev(&log_returns).unwrap_or(0.0);
        let recent_vol = if log_returns.len() >= recent {
            statistics::std_dev(statistics::tail(&log_returns, recent)).unwrap_or(daily_vol)
        } else {
            daily_vol
        };
        let weekly_vol = daily_vol * 7f64.sqrt();
        let annualized_vol = daily_vol * 365f64.sqrt();

        HistoricalVolatility {
            daily_volatility_pct: daily_vol * 100.0,
            weekly_volatility_pct: weekly_vol * 100.0,
            recent_volatility_pct: recent_vol * 100.0,
            annualized_volatility_pct: annualized_vol * 100.0,
            trend: self.trend(&log_returns),
            used_defaults: false,
        }
    }

    /// Compares the last `recent_days` returns with the window before them.
    fn trend(&self, log_returns: &[f64]) -> VolatilityTrend {
        let recent = self.config.recent_days;
        let len = log_returns.len();
        if recent < 2 || len < recent * 2 {
            return VolatilityTrend::Unknown;
        }

        let old_vol = statistics::std_dev(&log_returns[len - 2 * recent..len - recent]).unwrap_or(0.0);
        let new_vol = statistics::std_dev(&log_returns[len - recent..]).unwrap_or(0.0);

        if new_vol > old_vol * self.config.trend_up {
            VolatilityTrend::Increasing
        } else if new_vol < old_vol * self.config.trend_down {
            VolatilityTrend::Decreasing
        } else {
            VolatilityTrend::Stable
        }
    }

    /// Predicted intra-week volatility compared with realized volatility.
    ///
    /// The prediction comes from `bounds.lstm_volatility` when present,
    /// otherwise from half of the forecast range width.
    pub fn calculate_intra_week_volatility(&self, bounds: &PriceBounds, series: &PriceSeries) -> VolatilityResult {
        let hist = self.calculate_historical_volatility(series);

        let predicted_weekly_vol = match bounds.lstm_volatility {
            Some(weekly_pct) => weekly_pct / 100.0,
            None => bounds.range_width_pct / 100.0 / 2.0,
        };

        let historical_daily_vol = hist.daily_volatility_pct / 100.0;

        let volatility_score = if historical_daily_vol > 0.0 {
            predicted_weekly_vol / (historical_daily_vol * 7f64.sqrt()) * 100.0
        } else {
            100.0
        };

        let (risk_level, message) = if volatility_score < self.config.low_threshold {
            (
                VolatilityRisk::Low,
                "Expected volatility is below historical average",
            )
        } else if volatility_score < self.config.medium_threshold {
            (
                VolatilityRisk::Medium,
                "Expected volatility is near historical average",
            )
        } else {
            (
                VolatilityRisk::High,
                "Expected volatility exceeds historical average",
            )
        };

        let path_il = self.estimate_path_dependent_il(predicted_weekly_vol, historical_daily_vol);

        VolatilityResult {
            daily_volatility_pct: hist.daily_volatility_pct,
            weekly_volatility_pct: predicted_weekly_vol * 100.0,
            recent_volatility_pct: hist.recent_volatility_pct,
            annualized_volatility_pct: hist.annualized_volatility_pct,
            volatility_score,
            trend: hist.trend,
            risk_level,
            message: message.to_string(),
            estimated_path_il_pct: path_il * 100.0,
        }
    }

    /// Extra IL from the price path rather than the net move, as a decimal.
    ///
    /// Each expected swing adds `il_per_swing`, amplified for weekly
    /// volatility above 10%, up to `path_il_cap`.
    pub fn estimate_path_dependent_il(&self, weekly_vol: f64, daily_vol: f64) -> f64 {
        let expected_swings = if daily_vol > 0.0 {
            weekly_vol / daily_vol * self.config.swing_factor
        } else {
            self.config.default_swings
        };

        let path_il = expected_swings * self.config.il_per_swing * (weekly_vol * 10.0).max(1.0);
        path_il.min(self.config.path_il_cap)
    }

    /// Compares the realized volatility of both tokens.
    ///
    /// Mismatched volatilities indicate an unbalanced pair.
    pub fn compare_pair_volatility(&self, series_a: &PriceSeries, series_b: &PriceSeries) -> PairVolatility {
        let vol_a = self.calculate_historical_volatility(series_a);
        let vol_b = self.calculate_historical_volatility(series_b);

        let volatility_ratio = if vol_b.daily_volatility_pct > 0.0 {
            vol_a.daily_volatility_pct / vol_b.daily_volatility_pct
        } else {
            1.0
        };

        let (mismatch, message) = if (0.5..=2.0).contains(&volatility_ratio) {
            (
                VolatilityMismatch::Low,
                "Similar volatility levels - balanced pair",
            )
        } else if (0.25..=4.0).contains(&volatility_ratio) {
            (
                VolatilityMismatch::Medium,
                "Moderate volatility mismatch - some imbalance",
            )
        } else {
            (
                VolatilityMismatch::High,
                "Significant volatility mismatch - high imbalance risk",
            )
        };

        PairVolatility {
            token_a: vol_a,
            token_b: vol_b,
            volatility_ratio,
            mismatch,
            message: message.to_string(),
        }
    }
}
