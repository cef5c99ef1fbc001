use crate::enums::{CorrelationDirection, CorrelationRisk, StabilityLevel};
use serde::{Deserialize, Serialize};

/// Return correlation of a token pair and the divergence risk derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Pearson correlation of simple returns, in `[-1, 1]`.
    pub correlation: f64,
    /// `(1 - |correlation|) * 100`.
    pub divergence_risk_score: f64,
    pub risk: CorrelationRisk,
    pub message: String,
    /// Sensitivity of token A returns to token B returns.
    pub beta: f64,
    pub direction: CorrelationDirection,
    /// Number of aligned return points used.
    pub period_days: usize,
    /// Set when too few points were available and the fallback was returned.
    pub insufficient_data: bool,
}

/// Stability of the rolling correlation over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub stability_score: f64,
    pub mean_correlation: Option<f64>,
    pub correlation_std: Option<f64>,
    pub level: StabilityLevel,
    pub message: String,
}
