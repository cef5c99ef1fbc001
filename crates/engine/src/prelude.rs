//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use yield_safety_engine::prelude::*;
//! ```

pub use crate::config::{
    CorrelationScores, DEFAULT_SUPPORTED_TOKENS, EngineConfig, SafetyThresholds, SafetyWeights,
};
pub use crate::engine::{MarketSnapshot, SafetyEngine, SafetyRequest};
pub use crate::error::EngineError;
pub use yield_safety_domain::enums::Recommendation;
pub use yield_safety_domain::value_objects::{ComponentScores, GasFees, SafetyResult};
