pub mod price_bounds;
pub mod price_series;
pub mod token;

// Re-export for easier access
pub use price_bounds::PriceBounds;
pub use price_series::{PricePoint, PriceSeries};
pub use token::Token;
