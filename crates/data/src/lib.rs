//! Market data collaborators for the safety engine.
//!
//! The scoring core only needs two capabilities per token: forecast bounds
//! and a price history. This crate defines them as async traits and ships
//! implementations backed by memory, JSON fixture files and a synthetic
//! random walk, plus a time-boxed cache that can wrap any of them.

/// Error type for data providers.
pub mod error;
/// Provider traits.
pub mod provider;

/// Time-boxed caching decorator.
pub mod cache;
/// Providers reading JSON fixture files.
pub mod fixture;
/// In-memory providers.
pub mod memory;
/// Seeded synthetic price series.
pub mod synthetic;

pub use cache::CachedProvider;
pub use error::DataError;
pub use fixture::JsonFixtureProvider;
pub use memory::InMemoryMarketData;
pub use provider::{BoundsProvider, HistoryProvider};
