use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A fraction stored as a decimal (0.002 = 0.2%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction)
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10000)).to_u32().unwrap_or(0)
    }

    /// Value in percent points (0.002 -> 0.2).
    pub fn as_percent(&self) -> f64 {
        (self.0 * Decimal::from(100)).to_f64().unwrap_or(0.0)
    }
}
