use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// A token price quoted in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Builds a price from a float, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        Decimal::from_f64(value)
            .map(Self::new)
            .ok_or(DomainError::UnrepresentablePrice(value))
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// The price as `f64` for statistical work.
    pub fn as_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// Fails with [`DomainError::NonPositivePrice`] unless the price is above zero.
    pub fn ensure_positive(&self, field: &'static str) -> Result<(), DomainError> {
        if self.is_positive() {
            Ok(())
        } else {
            Err(DomainError::NonPositivePrice {
                field,
                value: self.value,
            })
        }
    }
}
