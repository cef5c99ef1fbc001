//! Errors raised when domain invariants are violated.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced while constructing or validating domain values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A price that must be strictly positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositivePrice {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// The forecast interval has its lower bound above its upper bound.
    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds {
        /// Lower bound.
        lower: Decimal,
        /// Upper bound.
        upper: Decimal,
    },
    /// A forecast safety score outside of `[0, 100]`.
    #[error("safety score {0} is outside [0, 100]")]
    SafetyScoreOutOfRange(f64),
    /// Series timestamps are not strictly increasing.
    #[error("price series timestamps must be strictly increasing (offending index {index})")]
    UnorderedSeries {
        /// Index of the first point that is not after its predecessor.
        index: usize,
    },
    /// A floating point value could not be converted to a decimal price.
    #[error("value {0} cannot be represented as a decimal price")]
    UnrepresentablePrice(f64),
}
