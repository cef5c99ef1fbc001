use crate::entities::price_bounds::PriceBounds;
use crate::enums::{Recommendation, VolatilityRisk};
use crate::value_objects::correlation::{CorrelationResult, StabilityResult};
use crate::value_objects::impermanent_loss::IlRange;
use crate::value_objects::price::Price;
use crate::value_objects::profitability::{BreakevenResult, OptimalHoldingPeriod, ProfitResult};
use crate::value_objects::volatility::{PairVolatility, VolatilityResult};
use serde::{Deserialize, Serialize};

/// Component scores, each 0 to 100 with higher meaning safer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub price_confidence: f64,
    pub il_risk: f64,
    pub correlation: f64,
    pub volatility: f64,
    pub profitability: f64,
}

/// Forecast interval of one token as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBoundsSummary {
    pub symbol: String,
    pub current_price: Price,
    pub predicted_price: Option<Price>,
    pub lower_bound: Price,
    pub upper_bound: Price,
    pub range_width_pct: f64,
}

impl TokenBoundsSummary {
    pub fn new(symbol: impl Into<String>, bounds: &PriceBounds) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: bounds.current_price,
            predicted_price: bounds.predicted_price,
            lower_bound: bounds.lower_bound,
            upper_bound: bounds.upper_bound,
            range_width_pct: bounds.range_width_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenVolatilitySummary {
    pub symbol: String,
    pub weekly_pct: f64,
    pub risk_level: VolatilityRisk,
}

/// Complete safety assessment of a token pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyResult {
    pub total_safety_score: f64,
    pub recommendation: Recommendation,
    pub message: String,
    pub suggested_position_size: f64,
    pub component_scores: ComponentScores,

    pub pool_apy: f64,
    pub breakeven_apy: f64,
    /// Pool APY minus expected break-even APY.
    pub expected_net_apy: f64,

    pub il_range: IlRange,
    pub correlation: CorrelationResult,
    pub correlation_stability: StabilityResult,
    pub volatility_a: VolatilityResult,
    pub volatility_b: VolatilityResult,
    pub volatility_summary: Vec<TokenVolatilitySummary>,
    pub pair_volatility: PairVolatility,
    pub breakeven: BreakevenResult,
    pub profit: ProfitResult,
    pub optimal_holding: OptimalHoldingPeriod,

    pub token_a: TokenBoundsSummary,
    pub token_b: TokenBoundsSummary,

    pub confidence_level: f64,
    pub prediction_horizon_days: u32,
}
