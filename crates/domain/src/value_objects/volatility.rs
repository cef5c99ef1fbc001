use crate::enums::{VolatilityMismatch, VolatilityRisk, VolatilityTrend};
use serde::{Deserialize, Serialize};

/// Realized volatility of one token's history, in percent points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalVolatility {
    pub daily_volatility_pct: f64,
    pub weekly_volatility_pct: f64,
    pub recent_volatility_pct: f64,
    pub annualized_volatility_pct: f64,
    pub trend: VolatilityTrend,
    /// Set when the series was too short and defaults were returned.
    pub used_defaults: bool,
}

/// Predicted intra-week volatility of one token compared with its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    pub daily_volatility_pct: f64,
    /// Predicted weekly volatility.
    pub weekly_volatility_pct: f64,
    pub recent_volatility_pct: f64,
    pub annualized_volatility_pct: f64,
    /// Predicted weekly volatility over historical weekly volatility, times 100.
    pub volatility_score: f64,
    pub trend: VolatilityTrend,
    pub risk_level: VolatilityRisk,
    pub message: String,
    /// Heuristic extra IL from intra-period oscillation, in percent points.
    pub estimated_path_il_pct: f64,
}

/// Historical volatility of both tokens side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairVolatility {
    pub token_a: HistoricalVolatility,
    pub token_b: HistoricalVolatility,
    /// Daily volatility of A over daily volatility of B.
    pub volatility_ratio: f64,
    pub mismatch: VolatilityMismatch,
    pub message: String,
}
