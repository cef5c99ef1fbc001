//! Impermanent loss over the joint forecast box of a token pair.
//!
//! The four corners combine each token's lower and upper bound. The center
//! scenario uses both predicted prices when the forecaster supplied them.

use serde::{Deserialize, Serialize};
use tracing::debug;
use yield_safety_domain::DomainError;
use yield_safety_domain::entities::PriceBounds;
use yield_safety_domain::enums::ScenarioKind;
use yield_safety_domain::math::statistics;
use yield_safety_domain::metrics::impermanent_loss;
use yield_safety_domain::value_objects::{IlPriceChange, IlRange, IlScenario, Price, TokenRangeSummary};

/// What to report as the expected IL when a predicted price is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterFallback {
    /// Mean of the four corner IL values; no center scenario is produced.
    #[default]
    MeanOfCorners,
    /// A center scenario evaluated at the midpoint of each token's interval.
    RangeMidpoint,
}

/// Configuration for the IL calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlConfig {
    pub center_fallback: CenterFallback,
}

/// Calculates impermanent loss scenarios for a token pair.
#[derive(Debug, Clone, Default)]
pub struct IlCalculator {
    config: IlConfig,
}

impl IlCalculator {
    /// Creates a new IL calculator.
    pub fn new(config: IlConfig) -> Self {
        Self { config }
    }

    /// IL as a decimal for a change `r` of the price ratio.
    ///
    /// See [`impermanent_loss::calculate_il_for_ratio`].
    pub fn calculate_il_for_ratio(price_ratio: f64) -> f64 {
        impermanent_loss::calculate_il_for_ratio(price_ratio)
    }

    /// IL in percent points for a change `r` of the price ratio.
    pub fn calculate_il_percentage(price_ratio: f64) -> f64 {
        impermanent_loss::calculate_il_percentage(price_ratio)
    }

    /// IL when both prices move from `initial` to `final` values.
    ///
    /// # Errors
    /// Returns [`DomainError::NonPositivePrice`] for a zero or negative price.
    pub fn calculate_il_for_price_change(
        initial_price_a: Price,
        initial_price_b: Price,
        final_price_a: Price,
        final_price_b: Price,
    ) -> Result<IlPriceChange, DomainError> {
        impermanent_loss::calculate_il_for_price_change(
            initial_price_a,
            initial_price_b,
            final_price_a,
            final_price_b,
        )
    }

    /// Evaluates IL at the four corners of the forecast box and at its center.
    ///
    /// # Errors
    /// Returns [`DomainError::NonPositivePrice`] if any price used as a
    /// divisor or ratio term is zero or negative.
    pub fn calculate_il_range(
        &self,
        bounds_a: &PriceBounds,
        bounds_b: &PriceBounds,
    ) -> Result<IlRange, DomainError> {
        ensure_positive_prices(
            bounds_a,
            [
                "token_a.current_price",
                "token_a.lower_bound",
                "token_a.upper_bound",
                "token_a.predicted_price",
            ],
        )?;
        ensure_positive_prices(
            bounds_b,
            [
                "token_b.current_price",
                "token_b.lower_bound",
                "token_b.upper_bound",
                "token_b.predicted_price",
            ],
        )?;

        let current_ratio = bounds_a.current_price.as_f64() / bounds_b.current_price.as_f64();

        let corners = [
            (ScenarioKind::LowerLower, bounds_a.lower_bound, bounds_b.lower_bound),
            (ScenarioKind::LowerUpper, bounds_a.lower_bound, bounds_b.upper_bound),
            (ScenarioKind::UpperLower, bounds_a.upper_bound, bounds_b.lower_bound),
            (ScenarioKind::UpperUpper, bounds_a.upper_bound, bounds_b.upper_bound),
        ]
        .map(|(kind, price_a, price_b)| scenario(kind, price_a, price_b, current_ratio));

        let corner_ils = corners.map(|c| c.il_pct);
        let worst_il = corner_ils.iter().copied().fold(f64::INFINITY, f64::min);
        let best_il = corner_ils.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average_il = statistics::mean(&corner_ils).unwrap_or(0.0);
        let il_uncertainty = statistics::population_std_dev(&corner_ils).unwrap_or(0.0);

        let center = match (bounds_a.predicted_price, bounds_b.predicted_price) {
            (Some(predicted_a), Some(predicted_b)) => Some(scenario(
                ScenarioKind::Center,
                predicted_a,
                predicted_b,
                current_ratio,
            )),
            _ => match self.config.center_fallback {
                CenterFallback::MeanOfCorners => {
                    debug!("Predicted price missing, expected IL falls back to corner mean");
                    None
                }
                CenterFallback::RangeMidpoint => {
                    debug!("Predicted price missing, evaluating range midpoints");
                    Some(scenario(
                        ScenarioKind::Center,
                        bounds_a.range().midpoint(),
                        bounds_b.range().midpoint(),
                        current_ratio,
                    ))
                }
            },
        };
        let expected_il = center.map_or(average_il, |c| c.il_pct);

        Ok(IlRange {
            worst_il,
            best_il,
            expected_il,
            average_il,
            il_uncertainty,
            max_il_risk_pct: worst_il.abs(),
            corners,
            center,
            token_a: summary(bounds_a),
            token_b: summary(bounds_b),
        })
    }
}

fn scenario(kind: ScenarioKind, price_a: Price, price_b: Price, current_ratio: f64) -> IlScenario {
    let future_ratio = price_a.as_f64() / price_b.as_f64();
    let ratio_change = future_ratio / current_ratio;
    IlScenario {
        kind,
        price_a,
        price_b,
        ratio_change,
        il_pct: impermanent_loss::calculate_il_percentage(ratio_change),
    }
}

fn summary(bounds: &PriceBounds) -> TokenRangeSummary {
    TokenRangeSummary {
        current: bounds.current_price,
        lower: bounds.lower_bound,
        upper: bounds.upper_bound,
    }
}

fn ensure_positive_prices(bounds: &PriceBounds, fields: [&'static str; 4]) -> Result<(), DomainError> {
    bounds.current_price.ensure_positive(fields[0])?;
    bounds.lower_bound.ensure_positive(fields[1])?;
    bounds.upper_bound.ensure_positive(fields[2])?;
    if let Some(predicted) = bounds.predicted_price {
        predicted.ensure_positive(fields[3])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sol() -> PriceBounds {
        PriceBounds::new(
            Price::new(dec!(122)),
            Price::new(dec!(118)),
            Price::new(dec!(128)),
            70.0,
        )
        .with_predicted_price(Price::new(dec!(124)))
    }

    fn jup() -> PriceBounds {
        PriceBounds::new(
            Price::new(dec!(0.85)),
            Price::new(dec!(0.78)),
            Price::new(dec!(0.95)),
            65.0,
        )
        .with_predicted_price(Price::new(dec!(0.88)))
    }

    #[test]
    fn test_sol_jup_scenario() {
        let range = IlCalculator::default().calculate_il_range(&sol(), &jup()).unwrap();

        // center ratio change = (124 / 0.88) / (122 / 0.85) ~ 0.9817 -> about -0.004%
        assert!(range.expected_il < 0.0);
        assert!(range.expected_il > -5.0);
        assert!(range.worst_il < range.expected_il);
        assert!(range.worst_il <= range.best_il);
        // lower SOL against upper JUP: ratio change ~ 0.8654 -> about -0.26%
        assert!((range.worst_il + 0.261).abs() < 0.01);
        assert_eq!(range.max_il_risk_pct, range.worst_il.abs());
        assert_eq!(range.min_il(), range.worst_il);
        assert_eq!(range.max_il(), range.best_il);
        assert_eq!(range.scenarios().count(), 5);
    }

    #[test]
    fn test_corner_order_and_values() {
        let range = IlCalculator::default().calculate_il_range(&sol(), &jup()).unwrap();
        let kinds: Vec<_> = range.corners.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::LowerLower,
                ScenarioKind::LowerUpper,
                ScenarioKind::UpperLower,
                ScenarioKind::UpperUpper
            ]
        );

        // lower A against upper B is the widest relative move
        let current_ratio = 122.0 / 0.85;
        let expected_change = (118.0 / 0.95) / current_ratio;
        let corner = range.corners[1];
        assert!((corner.ratio_change - expected_change).abs() < 1e-12);
        assert!((corner.il_pct - IlCalculator::calculate_il_percentage(expected_change)).abs() < 1e-12);
        assert_eq!(range.worst_il, corner.il_pct);
    }

    #[test]
    fn test_always_four_corners_for_extreme_inputs() {
        let a = PriceBounds::new(
            Price::new(dec!(65000)),
            Price::new(dec!(1)),
            Price::new(dec!(1000000)),
            10.0,
        );
        let b = PriceBounds::new(
            Price::new(dec!(0.000001)),
            Price::new(dec!(0.0000001)),
            Price::new(dec!(0.00001)),
            10.0,
        );
        let range = IlCalculator::default().calculate_il_range(&a, &b).unwrap();
        assert_eq!(range.corners.len(), 4);
        assert!(range.worst_il >= -100.0);
        assert!(range.best_il <= 0.0);
    }

    #[test]
    fn test_missing_prediction_uses_corner_mean() {
        let mut a = sol();
        a.predicted_price = None;
        let range = IlCalculator::default().calculate_il_range(&a, &jup()).unwrap();
        assert!(range.center.is_none());
        assert_eq!(range.expected_il, range.average_il);

        let mean: f64 = range.corners.iter().map(|c| c.il_pct).sum::<f64>() / 4.0;
        assert!((range.average_il - mean).abs() < 1e-12);
    }

    #[test]
    fn test_missing_prediction_with_midpoint_fallback() {
        let mut a = sol();
        a.predicted_price = None;
        let calculator = IlCalculator::new(IlConfig {
            center_fallback: CenterFallback::RangeMidpoint,
        });
        let range = calculator.calculate_il_range(&a, &jup()).unwrap();
        let center = range.center.unwrap();
        assert_eq!(center.kind, ScenarioKind::Center);
        assert_eq!(center.price_a.value, dec!(123));
        assert_eq!(range.expected_il, center.il_pct);
        // midpoint ratio change ~0.9907 sits closer to parity than any corner
        assert!((range.expected_il + 0.0011).abs() < 1e-4);
        assert!(range.worst_il <= range.expected_il);
        assert!(range.expected_il > range.best_il);
    }

    #[test]
    fn test_center_bounded_by_corners_on_one_side_of_parity() {
        // every ratio change is above 1, so IL falls monotonically across the box
        let a = PriceBounds::new(
            Price::new(dec!(100)),
            Price::new(dec!(110)),
            Price::new(dec!(130)),
            60.0,
        )
        .with_predicted_price(Price::new(dec!(120)));
        let b = PriceBounds::new(
            Price::new(dec!(1)),
            Price::new(dec!(0.9)),
            Price::new(dec!(1.0)),
            60.0,
        )
        .with_predicted_price(Price::new(dec!(0.95)));
        let range = IlCalculator::default().calculate_il_range(&a, &b).unwrap();

        assert!(range.worst_il <= range.expected_il);
        assert!(range.expected_il <= range.best_il);
        assert!((range.best_il + 0.1134).abs() < 1e-3);
        assert!((range.expected_il + 0.6783).abs() < 1e-3);
        assert!((range.worst_il + 1.6668).abs() < 1e-3);
    }

    #[test]
    fn test_center_near_parity_beats_every_corner() {
        let range = IlCalculator::default().calculate_il_range(&sol(), &jup()).unwrap();
        // corners straddle ratio change 1 where IL peaks at zero
        let ratios: Vec<f64> = range.corners.iter().map(|c| c.ratio_change).collect();
        assert!(ratios.iter().any(|&r| r < 1.0) && ratios.iter().any(|&r| r > 1.0));
        assert!(range.worst_il <= range.expected_il);
        assert!(range.expected_il > range.best_il);
        assert!((range.best_il + 0.0346).abs() < 1e-4);
        assert!((range.expected_il + 0.0042).abs() < 1e-4);
    }

    #[test]
    fn test_flat_bounds_have_no_uncertainty() {
        let a = PriceBounds::new(
            Price::new(dec!(10)),
            Price::new(dec!(10)),
            Price::new(dec!(10)),
            50.0,
        );
        let b = PriceBounds::new(Price::new(dec!(2)), Price::new(dec!(2)), Price::new(dec!(2)), 50.0);
        let range = IlCalculator::default().calculate_il_range(&a, &b).unwrap();
        assert_eq!(range.worst_il, 0.0);
        assert_eq!(range.best_il, 0.0);
        assert_eq!(range.il_uncertainty, 0.0);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let mut b = jup();
        b.current_price = Price::new(dec!(0));
        let err = IlCalculator::default().calculate_il_range(&sol(), &b).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositivePrice {
                field: "token_b.current_price",
                value: dec!(0),
            }
        );
    }

    #[test]
    fn test_price_change() {
        let change = IlCalculator::calculate_il_for_price_change(
            Price::new(dec!(100)),
            Price::new(dec!(1)),
            Price::new(dec!(150)),
            Price::new(dec!(1)),
        )
        .unwrap();
        assert!((change.ratio_change - 1.5).abs() < 1e-12);
        assert!((change.il_percentage + 2.0204).abs() < 1e-4);
        assert!((change.price_change_a_pct - 50.0).abs() < 1e-9);
        assert_eq!(change.price_change_b_pct, 0.0);
    }
}
