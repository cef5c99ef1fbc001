pub mod correlation;
pub mod impermanent_loss;
pub mod percentage;
pub mod price;
pub mod price_range;
pub mod profitability;
pub mod safety;
pub mod volatility;

pub use correlation::{CorrelationResult, StabilityResult};
pub use impermanent_loss::{IlPriceChange, IlRange, IlScenario, TokenRangeSummary};
pub use percentage::Percentage;
pub use price::Price;
pub use price_range::PriceRange;
pub use profitability::{
    BreakevenResult, CostBreakdown, GasFees, HoldingPeriodAnalysis, IlProjection,
    OptimalHoldingPeriod, ProfitResult,
};
pub use safety::{ComponentScores, SafetyResult, TokenBoundsSummary, TokenVolatilitySummary};
pub use volatility::{HistoricalVolatility, PairVolatility, VolatilityResult};
