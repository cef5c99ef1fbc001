//! Component scores and their combination into a recommendation.
//!
//! Every component is normalized to `[0, 100]`, higher meaning safer.

use crate::config::{SafetyThresholds, SafetyWeights};
use yield_safety_domain::enums::Recommendation;
use yield_safety_domain::value_objects::ComponentScores;

/// IL score lost per percent point of expected IL.
pub const IL_PENALTY_PER_PCT: f64 = 10.0;

/// Mean of the two forecasters' safety scores.
pub fn price_confidence_score(safety_a: f64, safety_b: f64) -> f64 {
    (safety_a + safety_b) / 2.0
}

/// `100 - |expected_il| * 10`, floored at zero; `expected_il` in percent points.
pub fn il_risk_score(expected_il_pct: f64) -> f64 {
    (100.0 - expected_il_pct.abs() * IL_PENALTY_PER_PCT).max(0.0)
}

/// Lower predicted-to-historical volatility is safer.
pub fn volatility_score(volatility_score_a: f64, volatility_score_b: f64) -> f64 {
    (100.0 - (volatility_score_a + volatility_score_b) / 2.0).max(0.0)
}

/// Full marks once the pool APY is at least twice break-even; 50 to 100 while
/// above break-even; below it every APY point of shortfall costs one point.
pub fn profitability_score(apy_margin: f64, breakeven_apy: f64) -> f64 {
    if apy_margin > breakeven_apy {
        100.0
    } else if apy_margin > 0.0 {
        50.0 + apy_margin / breakeven_apy.max(1.0) * 50.0
    } else {
        (50.0 + apy_margin).max(0.0)
    }
}

/// Weighted composite, limited to `[0, 100]`.
pub fn composite_score(scores: &ComponentScores, weights: &SafetyWeights) -> f64 {
    weights.apply(scores).clamp(0.0, 100.0)
}

/// First matching tier wins.
pub fn recommend(total_score: f64, profitability: f64, thresholds: &SafetyThresholds) -> Recommendation {
    if total_score >= thresholds.safe && profitability > thresholds.safe_min_profitability {
        Recommendation::SafeToFarm
    } else if total_score >= thresholds.moderate && profitability > thresholds.moderate_min_profitability {
        Recommendation::ModerateFarm
    } else if total_score >= thresholds.high_risk {
        Recommendation::HighRiskFarm
    } else {
        Recommendation::DoNotFarm
    }
}

pub fn recommendation_message(recommendation: Recommendation, apy_margin: f64) -> String {
    match recommendation {
        Recommendation::SafeToFarm => {
            format!("Safe to farm. Expected profit after IL: {apy_margin:.1}% APY")
        }
        Recommendation::ModerateFarm => {
            format!("Moderate risk. Farm with caution. Expected margin: {apy_margin:.1}% APY")
        }
        Recommendation::HighRiskFarm => {
            "High risk. Consider single-sided staking instead.".to_string()
        }
        Recommendation::DoNotFarm => {
            "Not safe. Expected costs exceed yields. Stay in stablecoins.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(value: [f64; 5]) -> ComponentScores {
        ComponentScores {
            price_confidence: value[0],
            il_risk: value[1],
            correlation: value[2],
            volatility: value[3],
            profitability: value[4],
        }
    }

    #[test]
    fn test_il_risk_score() {
        assert_eq!(il_risk_score(0.0), 100.0);
        assert!((il_risk_score(-2.1) - 79.0).abs() < 1e-9);
        assert_eq!(il_risk_score(-15.0), 0.0);
    }

    #[test]
    fn test_volatility_score() {
        assert_eq!(volatility_score(50.0, 70.0), 40.0);
        assert_eq!(volatility_score(150.0, 130.0), 0.0);
    }

    #[test]
    fn test_profitability_score_branches() {
        // twice break-even or more
        assert_eq!(profitability_score(150.0, 100.0), 100.0);
        // above break-even
        assert!((profitability_score(50.0, 100.0) - 75.0).abs() < 1e-12);
        // break-even below 1% APY is treated as 1%
        assert!((profitability_score(0.4, 0.5) - 70.0).abs() < 1e-12);
        // below break-even
        assert!((profitability_score(-20.0, 100.0) - 30.0).abs() < 1e-12);
        assert_eq!(profitability_score(-85.0, 130.0), 0.0);
    }

    #[test]
    fn test_composite_with_default_weights() {
        let weights = SafetyWeights::default();
        let total = composite_score(&scores([80.0, 79.0, 90.0, 40.0, 0.0]), &weights);
        // 20 + 19.75 + 18 + 6 + 0
        assert!((total - 63.75).abs() < 1e-9);
    }

    #[test]
    fn test_composite_is_bounded() {
        let weights = SafetyWeights::default();
        for mask in 0..32u32 {
            let value: [f64; 5] = std::array::from_fn(|i| if mask & (1 << i) != 0 { 100.0 } else { 0.0 });
            let total = composite_score(&scores(value), &weights);
            assert!((0.0..=100.0).contains(&total), "mask {mask} -> {total}");
        }
        assert!((composite_score(&scores([100.0; 5]), &weights) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommendation_tiers() {
        let t = SafetyThresholds::default();
        assert_eq!(recommend(80.0, 60.0, &t), Recommendation::SafeToFarm);
        // high score but thin profitability drops a tier
        assert_eq!(recommend(80.0, 50.0, &t), Recommendation::ModerateFarm);
        assert_eq!(recommend(65.0, 35.0, &t), Recommendation::ModerateFarm);
        assert_eq!(recommend(65.0, 30.0, &t), Recommendation::HighRiskFarm);
        assert_eq!(recommend(40.0, 0.0, &t), Recommendation::HighRiskFarm);
        assert_eq!(recommend(39.9, 100.0, &t), Recommendation::DoNotFarm);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            recommendation_message(Recommendation::SafeToFarm, 42.345),
            "Safe to farm. Expected profit after IL: 42.3% APY"
        );
        assert!(recommendation_message(Recommendation::DoNotFarm, -10.0).starts_with("Not safe"));
    }
}
