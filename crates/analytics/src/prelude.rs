//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use yield_safety_analytics::prelude::*;
//! ```

pub use crate::correlation::{CorrelationAnalyzer, CorrelationConfig};
pub use crate::il::{CenterFallback, IlCalculator, IlConfig};
pub use crate::profitability::{ProfitabilityAnalyzer, ProfitabilityConfig};
pub use crate::volatility::{DefaultVolatility, VolatilityAnalyzer, VolatilityConfig};
