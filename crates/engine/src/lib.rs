//! Yield farming safety engine.
//!
//! Scores the safety of providing liquidity to a two-token pool. For each
//! token the engine asks a [`BoundsProvider`](yield_safety_data::BoundsProvider)
//! for forecast bounds and a [`HistoryProvider`](yield_safety_data::HistoryProvider)
//! for recent prices, then combines five component scores:
//!
//! | Component        | Weight | Source |
//! |------------------|--------|--------|
//! | price confidence | 0.25   | mean forecaster safety score |
//! | IL risk          | 0.25   | expected IL of the forecast box |
//! | correlation      | 0.20   | correlation risk tier |
//! | volatility       | 0.15   | predicted vs. realized volatility |
//! | profitability    | 0.15   | pool APY vs. break-even APY |
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use yield_safety_data::JsonFixtureProvider;
//! use yield_safety_engine::prelude::*;
//!
//! # async fn run() -> Result<(), EngineError> {
//! let fixtures = Arc::new(JsonFixtureProvider::new("fixtures"));
//! let engine = SafetyEngine::new(Arc::clone(&fixtures), fixtures);
//! let result = engine
//!     .calculate_safety(&SafetyRequest::new("sol", "usdc", 35.0))
//!     .await?;
//! println!("{} ({:.1})", result.recommendation, result.total_safety_score);
//! # Ok(())
//! # }
//! ```

/// Prelude module for convenient imports.
pub mod prelude;

/// Engine configuration.
pub mod config;
/// The orchestrating engine.
pub mod engine;
/// Engine errors.
pub mod error;
/// Component scoring rules.
pub mod scoring;

pub use config::EngineConfig;
pub use engine::{MarketSnapshot, SafetyEngine, SafetyRequest};
pub use error::EngineError;
