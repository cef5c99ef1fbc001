//! Break-even APY and expected profit of a farming position.
//!
//! Costs for one holding period are the absolute IL plus the round-trip gas
//! fees. They are annualized by simple scaling, so halving the holding period
//! doubles the break-even APY for fixed costs.

use serde::{Deserialize, Serialize};
use tracing::debug;
use yield_safety_domain::enums::ProfitAssessment;
use yield_safety_domain::metrics::apy;
use yield_safety_domain::value_objects::{
    BreakevenResult, CostBreakdown, GasFees, HoldingPeriodAnalysis, IlProjection,
    OptimalHoldingPeriod, ProfitResult,
};

/// Configuration for the profitability analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityConfig {
    /// Gas fees used when the caller passes none.
    pub default_gas_fees: GasFees,
    pub default_holding_days: u32,
    /// Multiplier on the expected break-even for the recommended minimum APY.
    pub safety_margin: f64,
    /// Holding periods evaluated by the optimal holding search, in order.
    pub candidate_holding_days: Vec<u32>,
    /// Longest holding period evaluated when the caller passes none.
    pub max_holding_days: u32,
}

impl Default for ProfitabilityConfig {
    fn default() -> Self {
        Self {
            default_gas_fees: GasFees::default(),
            default_holding_days: 7,
            safety_margin: 1.5,
            candidate_holding_days: vec![1, 3, 7, 14, 30, 60, 90],
            max_holding_days: 90,
        }
    }
}

/// Determines the minimum APY required to break even after IL and gas.
#[derive(Debug, Clone, Default)]
pub struct ProfitabilityAnalyzer {
    config: ProfitabilityConfig,
}

impl ProfitabilityAnalyzer {
    /// Creates a new profitability analyzer.
    pub fn new(config: ProfitabilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfitabilityConfig {
        &self.config
    }

    /// APY needed to cover the projected IL and gas over `holding_days`.
    ///
    /// A zero-day holding period has no periods per year, so all annualized
    /// figures are zero.
    pub fn calculate_breakeven_apy(
        &self,
        il: impl Into<IlProjection>,
        gas_fees: Option<&GasFees>,
        holding_days: u32,
    ) -> BreakevenResult {
        let il = il.into();
        let gas_fees = gas_fees.unwrap_or(&self.config.default_gas_fees);

        let expected_il_cost_pct = il.expected_il.abs();
        let worst_case_il_cost_pct = il.worst_il.abs();
        let gas_cost_pct = gas_fees.total_pct();

        let expected_period_cost_pct = expected_il_cost_pct + gas_cost_pct;
        let worst_period_cost_pct = worst_case_il_cost_pct + gas_cost_pct;

        let expected_breakeven_apy = apy::annualize(expected_period_cost_pct, holding_days);
        let worst_case_breakeven_apy = apy::annualize(worst_period_cost_pct, holding_days);

        BreakevenResult {
            expected_breakeven_apy,
            worst_case_breakeven_apy,
            recommended_min_apy: expected_breakeven_apy * self.config.safety_margin,
            expected_il_cost_pct,
            worst_case_il_cost_pct,
            gas_cost_pct,
            expected_period_cost_pct,
            worst_period_cost_pct,
            holding_days,
            periods_per_year: apy::periods_per_year(holding_days),
        }
    }

    /// Expected profit or loss when farming at `pool_apy` percent.
    pub fn calculate_expected_profit(
        &self,
        pool_apy: f64,
        il: impl Into<IlProjection>,
        gas_fees: Option<&GasFees>,
        holding_days: u32,
    ) -> ProfitResult {
        let breakeven = self.calculate_breakeven_apy(il, gas_fees, holding_days);
        let breakeven_apy = breakeven.expected_breakeven_apy;

        let apy_margin = pool_apy - breakeven_apy;
        let apy_margin_worst_case = pool_apy - breakeven.worst_case_breakeven_apy;

        let profit_ratio = if breakeven_apy > 0.0 {
            pool_apy / breakeven_apy
        } else if pool_apy > 0.0 {
            f64::INFINITY
        } else {
            1.0
        };

        let period_yield_pct = apy::period_yield(pool_apy, holding_days);
        let expected_period_profit_pct = period_yield_pct - breakeven.expected_period_cost_pct;
        let worst_case_period_profit_pct = period_yield_pct - breakeven.worst_period_cost_pct;

        let (assessment, message) = if apy_margin > breakeven_apy {
            (
                ProfitAssessment::HighlyProfitable,
                format!("Pool APY is {profit_ratio:.1}x break-even rate"),
            )
        } else if apy_margin > 0.0 {
            (
                ProfitAssessment::Profitable,
                format!("Expected to earn {apy_margin:.1}% above break-even"),
            )
        } else if apy_margin > -breakeven_apy * 0.5 {
            (
                ProfitAssessment::Marginal,
                "Pool APY is below break-even but close".to_string(),
            )
        } else {
            (
                ProfitAssessment::Unprofitable,
                format!("Expected to lose {:.1}% annually", apy_margin.abs()),
            )
        };

        debug!(
            pool_apy,
            breakeven_apy,
            apy_margin,
            assessment = %assessment,
            "Profitability assessed"
        );

        ProfitResult {
            pool_apy,
            expected_breakeven_apy: breakeven_apy,
            apy_margin,
            apy_margin_worst_case,
            profit_ratio,
            period_yield_pct,
            expected_period_profit_pct,
            worst_case_period_profit_pct,
            assessment,
            message,
            cost_breakdown: CostBreakdown {
                expected_il: breakeven.expected_il_cost_pct,
                gas_fees: breakeven.gas_cost_pct,
                total_expected: breakeven.expected_period_cost_pct,
            },
        }
    }

    /// Holding period with the highest positive daily profit rate.
    ///
    /// Candidates longer than `max_days` are skipped. Ties keep the shorter
    /// period. When no candidate is profitable the default holding period is
    /// returned with a best rate of negative infinity.
    pub fn calculate_optimal_holding_period(
        &self,
        pool_apy: f64,
        il: impl Into<IlProjection>,
        gas_fees: Option<&GasFees>,
        max_days: Option<u32>,
    ) -> OptimalHoldingPeriod {
        let il = il.into();
        let max_days = max_days.unwrap_or(self.config.max_holding_days);

        let mut best_daily_profit_rate = f64::NEG_INFINITY;
        let mut optimal_holding_days = self.config.default_holding_days;
        let mut analysis_by_period = Vec::new();

        for &days in self.config.candidate_holding_days.iter().filter(|&&days| days <= max_days) {

            let profit = self.calculate_expected_profit(pool_apy, il, gas_fees, days);
            let daily_profit_rate = if days > 0 {
                profit.expected_period_profit_pct / f64::from(days)
            } else {
                0.0
            };

            if daily_profit_rate > best_daily_profit_rate && profit.expected_period_profit_pct > 0.0 {
                best_daily_profit_rate = daily_profit_rate;
                optimal_holding_days = days;
            }

            analysis_by_period.push(HoldingPeriodAnalysis {
                holding_days: days,
                period_profit_pct: profit.expected_period_profit_pct,
                daily_profit_rate,
                assessment: profit.assessment,
            });
        }

        OptimalHoldingPeriod {
            optimal_holding_days,
            best_daily_profit_rate,
            analysis_by_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yield_safety_domain::value_objects::Percentage;

    fn projection() -> IlProjection {
        IlProjection::new(-2.1, -4.5)
    }

    #[test]
    fn test_weekly_breakeven() {
        let result = ProfitabilityAnalyzer::default().calculate_breakeven_apy(projection(), None, 7);

        assert!((result.gas_cost_pct - 0.4).abs() < 1e-12);
        assert!((result.expected_period_cost_pct - 2.5).abs() < 1e-12);
        assert!((result.worst_period_cost_pct - 4.9).abs() < 1e-12);
        assert!((result.expected_breakeven_apy - 2.5 * 365.0 / 7.0).abs() < 1e-9);
        assert!((result.expected_breakeven_apy - 130.4).abs() < 0.1);
        assert!((result.worst_case_breakeven_apy - 4.9 * 365.0 / 7.0).abs() < 1e-9);
        assert!((result.recommended_min_apy - result.expected_breakeven_apy * 1.5).abs() < 1e-9);
        assert!((result.periods_per_year - 365.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_breakeven_scales_with_inverse_holding_days() {
        let analyzer = ProfitabilityAnalyzer::default();
        let fortnight = analyzer.calculate_breakeven_apy(projection(), None, 14);
        let half = analyzer.calculate_breakeven_apy(projection(), None, 7);
        assert!((half.expected_breakeven_apy - 2.0 * fortnight.expected_breakeven_apy).abs() < 1e-9);
    }

    #[test]
    fn test_zero_holding_days_is_degenerate() {
        let result = ProfitabilityAnalyzer::default().calculate_breakeven_apy(projection(), None, 0);
        assert_eq!(result.expected_breakeven_apy, 0.0);
        assert_eq!(result.worst_case_breakeven_apy, 0.0);
        assert_eq!(result.recommended_min_apy, 0.0);
        assert_eq!(result.periods_per_year, 0.0);
        // period costs stay defined
        assert!((result.expected_period_cost_pct - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_custom_gas_fees() {
        let gas = GasFees::new(Percentage::from_bps(50), Percentage::from_bps(25));
        let result = ProfitabilityAnalyzer::default().calculate_breakeven_apy(projection(), Some(&gas), 7);
        assert!((result.gas_cost_pct - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_low_apy_is_unprofitable() {
        let profit = ProfitabilityAnalyzer::default().calculate_expected_profit(45.0, projection(), None, 7);
        assert_eq!(profit.assessment, ProfitAssessment::Unprofitable);
        assert!(profit.apy_margin < -80.0);
        assert!((profit.profit_ratio - 45.0 / profit.expected_breakeven_apy).abs() < 1e-12);
        assert!((profit.period_yield_pct - 45.0 / 365.0 * 7.0).abs() < 1e-12);
        assert!((profit.expected_period_profit_pct - (profit.period_yield_pct - 2.5)).abs() < 1e-12);
        assert!((profit.cost_breakdown.total_expected - 2.5).abs() < 1e-12);
        assert!(profit.message.starts_with("Expected to lose"));
    }

    #[test]
    fn test_assessment_tiers() {
        let analyzer = ProfitabilityAnalyzer::default();
        let breakeven = 2.5 * 365.0 / 7.0;

        let assess = |apy: f64| analyzer.calculate_expected_profit(apy, projection(), None, 7).assessment;
        assert_eq!(assess(breakeven * 2.5), ProfitAssessment::HighlyProfitable);
        assert_eq!(assess(breakeven * 1.5), ProfitAssessment::Profitable);
        assert_eq!(assess(breakeven * 0.8), ProfitAssessment::Marginal);
        assert_eq!(assess(breakeven * 0.4), ProfitAssessment::Unprofitable);
    }

    #[test]
    fn test_profit_ratio_sentinels() {
        let analyzer = ProfitabilityAnalyzer::default();
        let free = GasFees::new(Percentage::from_bps(0), Percentage::from_bps(0));
        let no_loss = IlProjection::new(0.0, 0.0);

        let profit = analyzer.calculate_expected_profit(20.0, no_loss, Some(&free), 7);
        assert!(profit.profit_ratio.is_infinite());
        assert_eq!(profit.assessment, ProfitAssessment::HighlyProfitable);

        let profit = analyzer.calculate_expected_profit(0.0, no_loss, Some(&free), 7);
        assert_eq!(profit.profit_ratio, 1.0);
        assert_eq!(profit.assessment, ProfitAssessment::Unprofitable);
    }

    #[test]
    fn test_optimal_holding_prefers_longest_profitable_period() {
        // fixed 2.5% cost per period only pays off beyond ~20 days at 45% APY
        let optimal = ProfitabilityAnalyzer::default().calculate_optimal_holding_period(45.0, projection(), None, None);
        assert_eq!(optimal.analysis_by_period.len(), 7);
        assert_eq!(optimal.optimal_holding_days, 90);
        let expected_rate = (45.0 / 365.0 * 90.0 - 2.5) / 90.0;
        assert!((optimal.best_daily_profit_rate - expected_rate).abs() < 1e-12);
    }

    #[test]
    fn test_optimal_holding_respects_max_days() {
        let optimal = ProfitabilityAnalyzer::default().calculate_optimal_holding_period(45.0, projection(), None, Some(30));
        let days: Vec<u32> = optimal.analysis_by_period.iter().map(|p| p.holding_days).collect();
        assert_eq!(days, vec![1, 3, 7, 14, 30]);
        assert_eq!(optimal.optimal_holding_days, 30);
    }

    #[test]
    fn test_optimal_holding_with_unsorted_candidates() {
        let analyzer = ProfitabilityAnalyzer::new(ProfitabilityConfig {
            candidate_holding_days: vec![90, 1, 30, 7],
            ..ProfitabilityConfig::default()
        });
        let optimal = analyzer.calculate_optimal_holding_period(45.0, projection(), None, Some(30));
        let days: Vec<u32> = optimal.analysis_by_period.iter().map(|p| p.holding_days).collect();
        assert_eq!(days, vec![1, 30, 7]);
        assert_eq!(optimal.optimal_holding_days, 30);
    }

    #[test]
    fn test_optimal_holding_without_profitable_period() {
        let optimal = ProfitabilityAnalyzer::default().calculate_optimal_holding_period(5.0, projection(), None, None);
        assert_eq!(optimal.optimal_holding_days, 7);
        assert_eq!(optimal.best_daily_profit_rate, f64::NEG_INFINITY);
        assert!(optimal.analysis_by_period.iter().all(|p| p.period_profit_pct < 0.0));
    }
}
