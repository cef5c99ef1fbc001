use serde::{Deserialize, Serialize};
use std::fmt;

/// Divergence risk of a token pair, derived from return correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrelationRisk {
    LowRisk,
    MediumRisk,
    HighRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

/// How steady the rolling correlation has been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityLevel {
    Stable,
    Moderate,
    Unstable,
    Unknown,
}

/// Predicted volatility relative to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityTrend {
    Increasing,
    Decreasing,
    Stable,
    Unknown,
}

/// Mismatch between the historical volatilities of the two pooled tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityMismatch {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitAssessment {
    HighlyProfitable,
    Profitable,
    Marginal,
    Unprofitable,
}

/// Final farming recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    SafeToFarm,
    ModerateFarm,
    HighRiskFarm,
    DoNotFarm,
}

impl Recommendation {
    /// Fraction of the intended capital to deploy.
    pub fn suggested_position_size(&self) -> f64 {
        match self {
            Recommendation::SafeToFarm => 1.0,
            Recommendation::ModerateFarm => 0.5,
            Recommendation::HighRiskFarm => 0.25,
            Recommendation::DoNotFarm => 0.0,
        }
    }
}

/// Which price combination an IL scenario evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Both tokens at their lower bound.
    LowerLower,
    /// Token A at its lower bound, token B at its upper bound.
    LowerUpper,
    /// Token A at its upper bound, token B at its lower bound.
    UpperLower,
    /// Both tokens at their upper bound.
    UpperUpper,
    /// Both tokens at their predicted price.
    Center,
}

macro_rules! impl_display {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match self {
                    $(Self::$variant => $text),+
                };
                f.write_str(text)
            }
        }
    };
}

impl_display!(CorrelationRisk {
    LowRisk => "LOW_RISK",
    MediumRisk => "MEDIUM_RISK",
    HighRisk => "HIGH_RISK",
});

impl_display!(StabilityLevel {
    Stable => "STABLE",
    Moderate => "MODERATE",
    Unstable => "UNSTABLE",
    Unknown => "UNKNOWN",
});

impl_display!(VolatilityRisk {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

impl_display!(VolatilityTrend {
    Increasing => "increasing",
    Decreasing => "decreasing",
    Stable => "stable",
    Unknown => "unknown",
});

impl_display!(ProfitAssessment {
    HighlyProfitable => "HIGHLY_PROFITABLE",
    Profitable => "PROFITABLE",
    Marginal => "MARGINAL",
    Unprofitable => "UNPROFITABLE",
});

impl_display!(Recommendation {
    SafeToFarm => "SAFE_TO_FARM",
    ModerateFarm => "MODERATE_FARM",
    HighRiskFarm => "HIGH_RISK_FARM",
    DoNotFarm => "DO_NOT_FARM",
});
