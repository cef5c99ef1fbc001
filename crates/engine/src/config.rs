//! Engine configuration: component weights, recommendation thresholds and
//! the settings of every analyzer.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON file only
//! needs the fields it overrides:
//!
//! ```json
//! { "thresholds": { "safe": 80.0 }, "supported_tokens": ["sol", "usdc"] }
//! ```

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use yield_safety_analytics::prelude::*;
use yield_safety_domain::entities::Token;
use yield_safety_domain::enums::CorrelationRisk;
use yield_safety_domain::value_objects::ComponentScores;

/// Tokens the bounds forecaster was originally trained for.
pub const DEFAULT_SUPPORTED_TOKENS: [&str; 6] = ["sol", "jup", "jupsol", "pengu", "usdt", "usdc"];

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weight of each component in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyWeights {
    pub price_confidence: f64,
    pub il_risk: f64,
    pub correlation: f64,
    pub volatility: f64,
    pub profitability: f64,
}

impl Default for SafetyWeights {
    fn default() -> Self {
        Self {
            price_confidence: 0.25,
            il_risk: 0.25,
            correlation: 0.20,
            volatility: 0.15,
            profitability: 0.15,
        }
    }
}

impl SafetyWeights {
    pub fn total(&self) -> f64 {
        self.price_confidence + self.il_risk + self.correlation + self.volatility + self.profitability
    }

    /// Weighted sum of the component scores.
    pub fn apply(&self, scores: &ComponentScores) -> f64 {
        self.price_confidence * scores.price_confidence
            + self.il_risk * scores.il_risk
            + self.correlation * scores.correlation
            + self.volatility * scores.volatility
            + self.profitability * scores.profitability
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.price_confidence,
            self.il_risk,
            self.correlation,
            self.volatility,
            self.profitability,
        ]
    }
}

/// Minimum composite and profitability scores for each recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyThresholds {
    pub safe: f64,
    pub moderate: f64,
    pub high_risk: f64,
    /// Profitability score that must be exceeded for a safe recommendation.
    pub safe_min_profitability: f64,
    /// Profitability score that must be exceeded for a moderate recommendation.
    pub moderate_min_profitability: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            safe: 75.0,
            moderate: 60.0,
            high_risk: 40.0,
            safe_min_profitability: 50.0,
            moderate_min_profitability: 30.0,
        }
    }
}

/// Correlation component score for each correlation risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationScores {
    pub low_risk: f64,
    pub medium_risk: f64,
    pub high_risk: f64,
}

impl Default for CorrelationScores {
    fn default() -> Self {
        Self {
            low_risk: 90.0,
            medium_risk: 60.0,
            high_risk: 30.0,
        }
    }
}

impl CorrelationScores {
    pub fn score(&self, risk: CorrelationRisk) -> f64 {
        match risk {
            CorrelationRisk::LowRisk => self.low_risk,
            CorrelationRisk::MediumRisk => self.medium_risk,
            CorrelationRisk::HighRisk => self.high_risk,
        }
    }
}

/// Configuration of the safety engine and the analyzers it builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: SafetyWeights,
    pub thresholds: SafetyThresholds,
    pub correlation_scores: CorrelationScores,
    /// Days of history requested per token.
    pub history_days: u32,
    /// Holding period used for break-even and profit, also reported as the
    /// prediction horizon.
    pub holding_days: u32,
    /// Confidence level passed to the bounds provider when the request has none.
    pub default_confidence_level: f64,
    /// Lowercase symbols accepted by the engine; empty accepts every token.
    pub supported_tokens: Vec<String>,
    pub il: IlConfig,
    pub correlation: CorrelationConfig,
    pub volatility: VolatilityConfig,
    pub profitability: ProfitabilityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SafetyWeights::default(),
            thresholds: SafetyThresholds::default(),
            correlation_scores: CorrelationScores::default(),
            history_days: 30,
            holding_days: 7,
            default_confidence_level: 0.80,
            supported_tokens: Vec::new(),
            il: IlConfig::default(),
            correlation: CorrelationConfig::default(),
            volatility: VolatilityConfig::default(),
            profitability: ProfitabilityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Restricts the engine to the given symbols.
    #[must_use]
    pub fn with_supported_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.supported_tokens = tokens
            .into_iter()
            .map(|s| Token::new(s).symbol)
            .collect();
        self
    }

    pub fn is_supported(&self, token: &Token) -> bool {
        self.supported_tokens.is_empty()
            || self
                .supported_tokens
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&token.symbol))
    }

    /// Checks that weights are non-negative and sum to one, that thresholds
    /// are ordered and that the default confidence level lies in `(0, 1)`.
    pub fn validate(&self) -> Result<(), EngineError> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "component weights must be non-negative".to_string(),
            ));
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "component weights must sum to 1.0, got {total}"
            )));
        }

        let t = &self.thresholds;
        if !(t.safe >= t.moderate && t.moderate >= t.high_risk && t.high_risk >= 0.0 && t.safe <= 100.0) {
            return Err(EngineError::InvalidConfig(format!(
                "thresholds must satisfy 100 >= safe >= moderate >= high_risk >= 0, got {} / {} / {}",
                t.safe, t.moderate, t.high_risk
            )));
        }

        if !(self.default_confidence_level > 0.0 && self.default_confidence_level < 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "default confidence level must be in (0, 1), got {}",
                self.default_confidence_level
            )));
        }

        if self.history_days == 0 {
            return Err(EngineError::InvalidConfig(
                "history_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
