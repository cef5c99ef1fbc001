use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: Price,
    pub upper_price: Price,
}

impl PriceRange {
    pub fn new(lower: Price, upper: Price) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value <= self.upper_price.value
    }

    pub fn midpoint(&self) -> Price {
        Price::new((self.lower_price.value + self.upper_price.value) / Decimal::TWO)
    }

    /// Width of the range relative to `reference`, in percent points.
    pub fn width_pct(&self, reference: Price) -> Decimal {
        if reference.value.is_zero() {
            return Decimal::ZERO;
        }
        (self.upper_price.value - self.lower_price.value) / reference.value * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contains_and_width() {
        let range = PriceRange::new(Price::new(dec!(118)), Price::new(dec!(128)));
        assert!(range.contains(Price::new(dec!(122))));
        assert!(!range.contains(Price::new(dec!(130))));
        assert_eq!(range.midpoint().value, dec!(123));
        assert_eq!(range.width_pct(Price::new(dec!(100))), dec!(10));
    }
}
