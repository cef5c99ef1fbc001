use crate::enums::ScenarioKind;
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

/// IL evaluated for one pair of future prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlScenario {
    pub kind: ScenarioKind,
    pub price_a: Price,
    pub price_b: Price,
    /// Future price ratio divided by the current one.
    pub ratio_change: f64,
    /// Impermanent loss in percent points (non-positive).
    pub il_pct: f64,
}

/// Current price and forecast interval of one token, as used by the IL range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenRangeSummary {
    pub current: Price,
    pub lower: Price,
    pub upper: Price,
}

/// IL across the corners of the joint forecast box.
///
/// All IL figures are percent points. `worst_il` is the most negative corner
/// (the minimum) and `best_il` the corner closest to zero (the maximum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlRange {
    pub worst_il: f64,
    pub best_il: f64,
    /// IL at the predicted center, or the corner mean when there is none.
    pub expected_il: f64,
    pub average_il: f64,
    /// Population standard deviation of the four corner values.
    pub il_uncertainty: f64,
    /// `|worst_il|`.
    pub max_il_risk_pct: f64,
    pub corners: [IlScenario; 4],
    pub center: Option<IlScenario>,
    pub token_a: TokenRangeSummary,
    pub token_b: TokenRangeSummary,
}

impl IlRange {
    /// Alias of `worst_il`: the numerically smallest corner.
    pub fn min_il(&self) -> f64 {
        self.worst_il
    }

    /// Alias of `best_il`: the numerically largest corner.
    pub fn max_il(&self) -> f64 {
        self.best_il
    }

    /// Corner scenarios followed by the center scenario when present.
    pub fn scenarios(&self) -> impl Iterator<Item = &IlScenario> {
        self.corners.iter().chain(self.center.iter())
    }
}

/// IL for a concrete move of both token prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlPriceChange {
    pub il_decimal: f64,
    pub il_percentage: f64,
    pub ratio_change: f64,
    pub price_change_a_pct: f64,
    pub price_change_b_pct: f64,
}
