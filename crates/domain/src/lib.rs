//! Domain model for yield farming safety scoring.
//!
//! This crate holds the value objects, entities and result records shared by
//! the analyzers and the safety engine:
//! - Price and percentage value objects backed by `rust_decimal`
//! - Token identity, forecast price bounds and historical price series
//! - Risk tiers and recommendations
//! - The constant-product impermanent loss identity
//! - Return and correlation statistics

/// Entities consumed by the scoring pipeline.
pub mod entities;
/// Risk tiers, trends and recommendations.
pub mod enums;
/// Domain errors.
pub mod error;
/// Statistics helpers.
pub mod math;
/// Financial metrics.
pub mod metrics;
/// Value objects and result records.
pub mod value_objects;

pub use error::DomainError;
