use crate::enums::ProfitAssessment;
use crate::value_objects::impermanent_loss::IlRange;
use crate::value_objects::percentage::Percentage;
use serde::{Deserialize, Serialize};

/// Entry and exit costs as fractions of the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasFees {
    pub entry: Percentage,
    pub exit: Percentage,
}

impl GasFees {
    pub fn new(entry: Percentage, exit: Percentage) -> Self {
        Self { entry, exit }
    }

    /// Round-trip cost in percent points.
    pub fn total_pct(&self) -> f64 {
        self.entry.as_percent() + self.exit.as_percent()
    }
}

impl Default for GasFees {
    fn default() -> Self {
        Self {
            entry: Percentage::from_bps(20), // 0.2%
            exit: Percentage::from_bps(20),  // 0.2%
        }
    }
}

/// Expected and worst-case IL for a holding period, in percent points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlProjection {
    pub expected_il: f64,
    pub worst_il: f64,
}

impl IlProjection {
    pub fn new(expected_il: f64, worst_il: f64) -> Self {
        Self {
            expected_il,
            worst_il,
        }
    }
}

impl From<&IlRange> for IlProjection {
    fn from(range: &IlRange) -> Self {
        Self::new(range.expected_il, range.worst_il)
    }
}

/// APY needed to cover IL and gas over a holding period.
///
/// Costs are percent points for one holding period; APYs are annualized
/// percent points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakevenResult {
    pub expected_breakeven_apy: f64,
    pub worst_case_breakeven_apy: f64,
    /// Expected break-even times the safety margin.
    pub recommended_min_apy: f64,
    pub expected_il_cost_pct: f64,
    pub worst_case_il_cost_pct: f64,
    pub gas_cost_pct: f64,
    pub expected_period_cost_pct: f64,
    pub worst_period_cost_pct: f64,
    pub holding_days: u32,
    pub periods_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub expected_il: f64,
    pub gas_fees: f64,
    pub total_expected: f64,
}

/// Expected outcome of farming a pool at a given APY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitResult {
    pub pool_apy: f64,
    pub expected_breakeven_apy: f64,
    pub apy_margin: f64,
    pub apy_margin_worst_case: f64,
    /// Pool APY over break-even; infinite when break-even is zero and the APY positive.
    #[serde(with = "extended_float")]
    pub profit_ratio: f64,
    pub period_yield_pct: f64,
    pub expected_period_profit_pct: f64,
    pub worst_case_period_profit_pct: f64,
    pub assessment: ProfitAssessment,
    pub message: String,
    pub cost_breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingPeriodAnalysis {
    pub holding_days: u32,
    pub period_profit_pct: f64,
    pub daily_profit_rate: f64,
    pub assessment: ProfitAssessment,
}

/// Holding period with the best positive daily profit rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalHoldingPeriod {
    pub optimal_holding_days: u32,
    /// Negative infinity when no candidate was profitable.
    #[serde(with = "extended_float")]
    pub best_daily_profit_rate: f64,
    pub analysis_by_period: Vec<HoldingPeriodAnalysis>,
}

/// `f64` that keeps infinities and NaN through JSON, written as `"inf"`,
/// `"-inf"` and `"NaN"`.
mod extended_float {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(de::Error::custom(format!("invalid float `{other}`"))),
            },
        }
    }
}
