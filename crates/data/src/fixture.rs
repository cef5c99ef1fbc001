//! Market data read from JSON files, one document per token.
//!
//! A fixture for `sol` lives at `<dir>/sol.json`:
//!
//! ```json
//! {
//!   "bounds": {
//!     "current_price": "122", "predicted_price": "124",
//!     "lower_bound": "118", "upper_bound": "128",
//!     "range_width_pct": 8.2, "safety_score": 72.5
//!   },
//!   "history": [{ "timestamp": 1709251200, "price": "120.5" }]
//! }
//! ```

use crate::error::DataError;
use crate::provider::{BoundsProvider, HistoryProvider};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use yield_safety_domain::entities::{PriceBounds, PriceSeries, Token};

/// Contents of one fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    pub bounds: PriceBounds,
    pub history: PriceSeries,
}

/// Reads bounds and history from `<dir>/<symbol>.json`.
#[derive(Debug, Clone)]
pub struct JsonFixtureProvider {
    dir: PathBuf,
}

impl JsonFixtureProvider {
    /// Creates a provider reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fixture path for `token`; symbols outside `[a-z0-9_-]` are rejected so
    /// lookups stay inside `dir`.
    fn path_for(&self, token: &Token) -> Result<PathBuf, DataError> {
        let symbol = token.symbol.as_str();
        let valid = !symbol.is_empty()
            && symbol
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        if !valid {
            return Err(DataError::invalid(symbol, "symbol is not a valid fixture name"));
        }
        Ok(self.dir.join(format!("{symbol}.json")))
    }

    /// Writes a fixture document for `token`, replacing any existing one.
    pub async fn write(&self, token: &Token, document: &FixtureDocument) -> Result<(), DataError> {
        let path = self.path_for(token)?;
        let json = serde_json::to_string_pretty(document).context("serializing fixture")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("writing fixture {}", path.display()))?;
        Ok(())
    }

    /// Loads and validates the fixture for `token`.
    pub async fn load(&self, token: &Token) -> Result<FixtureDocument, DataError> {
        let path = self.path_for(token)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::not_found(&token.symbol));
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("reading fixture {}", path.display()))
                    .into());
            }
        };
        debug!(token = %token, path = %path.display(), "Loaded fixture");

        let document: FixtureDocument =
            serde_json::from_str(&raw).map_err(|e| DataError::invalid(&token.symbol, e))?;
        document
            .bounds
            .validate()
            .map_err(|e| DataError::invalid(&token.symbol, e))?;
        Ok(document)
    }
}

#[async_trait]
impl BoundsProvider for JsonFixtureProvider {
    async fn get_bounds(&self, token: &Token, _confidence_level: f64) -> Result<PriceBounds, DataError> {
        Ok(self.load(token).await?.bounds)
    }
}

#[async_trait]
impl HistoryProvider for JsonFixtureProvider {
    async fn get_history(&self, token: &Token, days: u32) -> Result<PriceSeries, DataError> {
        Ok(self.load(token).await?.history.tail(days as usize + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use yield_safety_domain::value_objects::Price;

    fn document() -> FixtureDocument {
        let bounds = PriceBounds::new(
            Price::new(dec!(122)),
            Price::new(dec!(118)),
            Price::new(dec!(128)),
            72.5,
        )
        .with_predicted_price(Price::new(dec!(124)));
        let closes: Vec<f64> = (0..40).map(|i| 110.0 + (i % 5) as f64).collect();
        FixtureDocument {
            bounds,
            history: PriceSeries::from_closes(1_700_000_000, 86_400, &closes).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFixtureProvider::new(dir.path());
        let token = Token::new("SOL");
        provider.write(&token, &document()).await.unwrap();
        assert!(dir.path().join("sol.json").exists());

        let bounds = provider.get_bounds(&token, 0.8).await.unwrap();
        assert_eq!(bounds.predicted_price, Some(Price::new(dec!(124))));

        let history = provider.get_history(&token, 30).await.unwrap();
        assert_eq!(history.len(), 31);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFixtureProvider::new(dir.path());
        let err = provider.get_bounds(&Token::new("jup"), 0.8).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_hand_written_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "bounds": {
                "current_price": 0.85, "predicted_price": 0.88,
                "lower_bound": 0.78, "upper_bound": 0.95,
                "range_width_pct": 20.0, "safety_score": 61.0,
                "lstm_volatility": 9.5
            },
            "history": [
                {"timestamp": 1, "price": "0.80"},
                {"timestamp": 2, "price": "0.82"}
            ]
        }"#;
        std::fs::write(dir.path().join("jup.json"), json).unwrap();

        let provider = JsonFixtureProvider::new(dir.path());
        let bounds = provider.get_bounds(&Token::new("jup"), 0.8).await.unwrap();
        assert_eq!(bounds.lstm_volatility, Some(9.5));
        assert_eq!(bounds.lower_bound, Price::new(dec!(0.78)));
    }

    #[tokio::test]
    async fn test_inverted_bounds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = document();
        std::mem::swap(&mut doc.bounds.lower_bound, &mut doc.bounds.upper_bound);
        let provider = JsonFixtureProvider::new(dir.path());
        let token = Token::new("sol");
        provider.write(&token, &doc).await.unwrap();

        let err = provider.get_bounds(&token, 0.8).await.unwrap_err();
        assert!(matches!(err, DataError::InvalidData { .. }));
    }

    #[tokio::test]
    async fn test_symbols_cannot_leave_the_fixture_dir() {
        let root = tempfile::tempdir().unwrap();
        let fixtures = root.path().join("fixtures");
        std::fs::create_dir(&fixtures).unwrap();
        let outside = serde_json::to_string(&document()).unwrap();
        std::fs::write(root.path().join("secret.json"), outside).unwrap();

        let provider = JsonFixtureProvider::new(&fixtures);
        for symbol in ["../secret", "sol/../../secret", "/tmp/sol", "jup.sol"] {
            let err = provider.get_bounds(&Token::new(symbol), 0.8).await.unwrap_err();
            assert!(matches!(err, DataError::InvalidData { .. }), "{symbol}");
        }
        let err = provider
            .write(&Token::new("../secret"), &document())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidData { .. }));

        // hyphens, underscores and digits are allowed
        let token = Token::new("wbtc_2-x");
        provider.write(&token, &document()).await.unwrap();
        assert!(provider.get_bounds(&token, 0.8).await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pengu.json"), "{ not json").unwrap();
        let provider = JsonFixtureProvider::new(dir.path());
        let err = provider.get_history(&Token::new("pengu"), 30).await.unwrap_err();
        assert!(matches!(err, DataError::InvalidData { .. }));
    }
}
