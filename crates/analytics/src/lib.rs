//! Quantitative analyzers behind the yield farming safety score.
//!
//! Each analyzer is a pure function of already-fetched inputs, configured
//! at construction:
//! - [`il::IlCalculator`]: impermanent loss over the corners of the forecast box
//! - [`correlation::CorrelationAnalyzer`]: return correlation and its stability
//! - [`volatility::VolatilityAnalyzer`]: realized vs. predicted volatility
//! - [`profitability::ProfitabilityAnalyzer`]: break-even APY and expected profit

/// Prelude module for convenient imports.
pub mod prelude;

/// Correlation and divergence risk.
pub mod correlation;
/// Impermanent loss scenarios.
pub mod il;
/// Break-even and profit analysis.
pub mod profitability;
/// Volatility and path dependency.
pub mod volatility;
