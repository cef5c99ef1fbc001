//! Correlation between the two pooled tokens.
//!
//! Highly correlated tokens move together and keep the pool ratio stable;
//! weakly correlated tokens diverge and accumulate impermanent loss.

use serde::{Deserialize, Serialize};
use tracing::debug;
use yield_safety_domain::entities::PriceSeries;
use yield_safety_domain::enums::{CorrelationDirection, CorrelationRisk, StabilityLevel};
use yield_safety_domain::math::statistics;
use yield_safety_domain::value_objects::{CorrelationResult, StabilityResult};

/// Configuration for the correlation analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Maximum number of most recent aligned returns used.
    pub window: usize,
    /// Rolling window for the stability analysis.
    pub stability_window: usize,
    /// Minimum aligned returns for a correlation estimate.
    pub min_points: usize,
    /// Minimum rolling correlations for a stability estimate.
    pub min_rolling_points: usize,
    /// `|correlation|` above this is low risk.
    pub low_risk_threshold: f64,
    /// `|correlation|` above this (and not low risk) is medium risk.
    pub medium_risk_threshold: f64,
    /// Stability score above this is stable.
    pub stable_threshold: f64,
    /// Stability score above this (and not stable) is moderate.
    pub moderate_threshold: f64,
    /// Penalty per unit of rolling correlation standard deviation.
    pub stability_std_multiplier: f64,
    /// Stability score reported when there is not enough data.
    pub fallback_stability_score: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            window: 30,
            stability_window: 14,
            min_points: 5,
            min_rolling_points: 5,
            low_risk_threshold: 0.7,
            medium_risk_threshold: 0.4,
            stable_threshold: 70.0,
            moderate_threshold: 40.0,
            stability_std_multiplier: 200.0,
            fallback_stability_score: 50.0,
        }
    }
}

/// Analyzes correlation between token pairs to assess divergence risk.
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalyzer {
    config: CorrelationConfig,
}

impl CorrelationAnalyzer {
    /// Creates a new correlation analyzer.
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Correlation of simple returns over the configured window.
    pub fn calculate_correlation(&self, series_a: &PriceSeries, series_b: &PriceSeries) -> CorrelationResult {
        self.calculate_correlation_with_window(series_a, series_b, self.config.window)
    }

    /// Correlation of simple returns over at most `window` most recent
    /// aligned points.
    ///
    /// Fewer than `min_points` aligned returns yield a high-risk fallback
    /// instead of an estimate.
    pub fn calculate_correlation_with_window(
        &self,
        series_a: &PriceSeries,
        series_b: &PriceSeries,
        window: usize,
    ) -> CorrelationResult {
        let returns_a = series_a.simple_returns();
        let returns_b = series_b.simple_returns();

        let period = returns_a.len().min(returns_b.len()).min(window);
        let returns_a = statistics::tail(&returns_a, period);
        let returns_b = statistics::tail(&returns_b, period);

        if period < self.config.min_points {
            debug!(
                period,
                min_points = self.config.min_points,
                "Insufficient data for correlation analysis"
            );
            return CorrelationResult {
                correlation: 0.0,
                divergence_risk_score: 100.0,
                risk: CorrelationRisk::HighRisk,
                message: "Insufficient data for correlation analysis".to_string(),
                beta: 1.0,
                direction: CorrelationDirection::Negative,
                period_days: period,
                insufficient_data: true,
            };
        }

        // Undefined on zero-variance returns.
        let correlation = statistics::pearson_correlation(returns_a, returns_b).unwrap_or(0.0);
        let divergence_risk_score = (1.0 - correlation.abs()) * 100.0;
        let risk = self.classify(correlation);
        let message = match risk {
            CorrelationRisk::LowRisk => "Tokens are highly correlated - low IL risk from divergence",
            CorrelationRisk::MediumRisk => "Tokens show moderate correlation - some IL risk from divergence",
            CorrelationRisk::HighRisk => "Tokens are weakly correlated - high IL risk from divergence",
        };

        CorrelationResult {
            correlation,
            divergence_risk_score,
            risk,
            message: message.to_string(),
            beta: beta(returns_a, returns_b),
            direction: if correlation > 0.0 {
                CorrelationDirection::Positive
            } else {
                CorrelationDirection::Negative
            },
            period_days: period,
            insufficient_data: false,
        }
    }

    /// Risk tier for a correlation coefficient.
    pub fn classify(&self, correlation: f64) -> CorrelationRisk {
        let abs_corr = correlation.abs();
        if abs_corr > self.config.low_risk_threshold {
            CorrelationRisk::LowRisk
        } else if abs_corr > self.config.medium_risk_threshold {
            CorrelationRisk::MediumRisk
        } else {
            CorrelationRisk::HighRisk
        }
    }

    /// Rolling correlation of simple returns, right-aligned to the shorter
    /// series.
    ///
    /// Element `i` is the correlation over returns `i..i + window`. Windows
    /// where either side is flat report `0.0`.
    pub fn calculate_rolling_correlation(
        &self,
        series_a: &PriceSeries,
        series_b: &PriceSeries,
        window: usize,
    ) -> Vec<f64> {
        let returns_a = series_a.simple_returns();
        let returns_b = series_b.simple_returns();
        let len = returns_a.len().min(returns_b.len());

        statistics::rolling_correlation(
            statistics::tail(&returns_a, len),
            statistics::tail(&returns_b, len),
            window,
        )
        .into_iter()
        .map(|c| c.unwrap_or(0.0))
        .collect()
    }

    /// How stable the correlation has been over time.
    ///
    /// An unstable relationship may change during the holding period.
    pub fn get_correlation_stability(&self, series_a: &PriceSeries, series_b: &PriceSeries) -> StabilityResult {
        let rolling =
            self.calculate_rolling_correlation(series_a, series_b, self.config.stability_window);

        if rolling.len() < self.config.min_rolling_points {
            debug!(
                points = rolling.len(),
                "Insufficient data for correlation stability analysis"
            );
            return StabilityResult {
                stability_score: self.config.fallback_stability_score,
                mean_correlation: None,
                correlation_std: None,
                level: StabilityLevel::Unknown,
                message: "Insufficient data for stability analysis".to_string(),
            };
        }

        let mean_corr = statistics::mean(&rolling).unwrap_or(0.0);
        let std_corr = statistics::std_dev(&rolling).unwrap_or(0.0);

        let stability_score = (100.0 - std_corr * self.config.stability_std_multiplier).max(0.0);

        let (level, message) = if stability_score > self.config.stable_threshold {
            (StabilityLevel::Stable, "Correlation has been stable over time")
        } else if stability_score > self.config.moderate_threshold {
            (StabilityLevel::Moderate, "Correlation shows some variability")
        } else {
            (
                StabilityLevel::Unstable,
                "Correlation is highly variable - relationship may change",
            )
        };

        StabilityResult {
            stability_score,
            mean_correlation: Some(mean_corr),
            correlation_std: Some(std_corr),
            level,
            message: message.to_string(),
        }
    }
}

/// Sensitivity of A to B: `cov(a, b) / var(b)`, 1.0 when B is flat.
fn beta(returns_a: &[f64], returns_b: &[f64]) -> f64 {
    match (
        statistics::covariance(returns_a, returns_b),
        statistics::variance(returns_b),
    ) {
        (Some(cov), Some(var_b)) if var_b != 0.0 => cov / var_b,
        _ => 1.0,
    }
}
