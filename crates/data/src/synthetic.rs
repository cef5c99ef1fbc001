//! Synthetic price histories from a geometric Brownian motion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use yield_safety_domain::DomainError;
use yield_safety_domain::entities::{PricePoint, PriceSeries};
use yield_safety_domain::value_objects::Price;

/// Log-normal random walk with constant drift and volatility.
#[derive(Debug, Clone)]
pub struct GeometricBrownianMotion {
    pub initial_price: Decimal,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
    pub seed: Option<u64>,
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: Decimal, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            seed: None,
        }
    }

    /// Makes every generated path reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn step(&self, price: f64, z: f64) -> f64 {
        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();
        price * (drift_term + vol_term * z).exp()
    }

    /// Initial price followed by `steps` simulated prices.
    pub fn generate(&self, steps: usize) -> Vec<f64> {
        let mut rng = self.rng();
        let mut current = self.initial_price.to_f64().unwrap_or(0.0);
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(current);
        for _ in 0..steps {
            current = self.step(current, rng.sample(StandardNormal));
            prices.push(current);
        }
        prices
    }

    /// A series of `points` prices spaced `step_secs` apart.
    pub fn generate_series(&self, start_timestamp: u64, step_secs: u64, points: usize) -> Result<PriceSeries, DomainError> {
        let prices = self.generate(points.saturating_sub(1));
        PriceSeries::from_closes(start_timestamp, step_secs, &prices[..points.min(prices.len())])
    }

    /// Two series whose return shocks have the given correlation.
    ///
    /// `self` drives the first series and `other` the second; only the
    /// first walk's seed is used.
    pub fn generate_correlated_pair(
        &self,
        other: &GeometricBrownianMotion,
        correlation: f64,
        start_timestamp: u64,
        step_secs: u64,
        points: usize,
    ) -> Result<(PriceSeries, PriceSeries), DomainError> {
        let rho = correlation.clamp(-1.0, 1.0);
        let independent = (1.0 - rho * rho).sqrt();
        let mut rng = self.rng();

        let mut price_a = self.initial_price.to_f64().unwrap_or(0.0);
        let mut price_b = other.initial_price.to_f64().unwrap_or(0.0);
        let mut points_a = Vec::with_capacity(points);
        let mut points_b = Vec::with_capacity(points);

        for i in 0..points {
            if i > 0 {
                let z_a: f64 = rng.sample(StandardNormal);
                let z_free: f64 = rng.sample(StandardNormal);
                price_a = self.step(price_a, z_a);
                price_b = other.step(price_b, rho * z_a + independent * z_free);
            }
            let timestamp = start_timestamp + i as u64 * step_secs;
            points_a.push(PricePoint::new(timestamp, Price::from_f64(price_a)?));
            points_b.push(PricePoint::new(timestamp, Price::from_f64(price_b)?));
        }

        Ok((PriceSeries::new(points_a)?, PriceSeries::new(points_b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use yield_safety_domain::math::statistics;

    const DAY: u64 = 86_400;

    #[test]
    fn test_gbm_generation() {
        let gbm = GeometricBrownianMotion::new(dec!(100), 0.0, 0.2, 1.0 / 365.0);
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path[0], 100.0);
        assert!(!path.iter().all(|p| *p == 100.0));
    }

    #[test]
    fn test_seed_reproduces_path() {
        let gbm = GeometricBrownianMotion::new(dec!(1.5), 0.05, 0.8, 1.0 / 365.0).with_seed(42);
        assert_eq!(gbm.generate(50), gbm.generate(50));

        let other = gbm.clone().with_seed(43);
        assert_ne!(gbm.generate(50), other.generate(50));
    }

    #[test]
    fn test_series_has_requested_length() {
        let series = GeometricBrownianMotion::new(dec!(20), 0.0, 0.5, 1.0 / 365.0)
            .with_seed(1)
            .generate_series(1_700_000_000, DAY, 31)
            .unwrap();
        assert_eq!(series.len(), 31);
        let points = series.points();
        assert_eq!(points[1].timestamp - points[0].timestamp, DAY);
    }

    #[test]
    fn test_correlated_pair() {
        let a = GeometricBrownianMotion::new(dec!(120), 0.0, 0.6, 1.0 / 365.0).with_seed(11);
        let b = GeometricBrownianMotion::new(dec!(0.9), 0.0, 0.9, 1.0 / 365.0);

        let (sa, sb) = a.generate_correlated_pair(&b, 0.95, 0, DAY, 90).unwrap();
        assert_eq!(sa.len(), 90);
        assert_eq!(sb.len(), 90);
        let corr = statistics::pearson_correlation(&sa.simple_returns(), &sb.simple_returns()).unwrap();
        assert!(corr > 0.8, "correlation {corr}");

        let (sa, sb) = a.generate_correlated_pair(&b, -0.95, 0, DAY, 90).unwrap();
        let corr = statistics::pearson_correlation(&sa.simple_returns(), &sb.simple_returns()).unwrap();
        assert!(corr < -0.8, "correlation {corr}");
    }
}
