//! The safety engine: fetches market data for a token pair, runs every
//! analyzer and combines their outputs into one score.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::scoring;
use tracing::{debug, info, warn};
use yield_safety_analytics::prelude::*;
use yield_safety_data::{BoundsProvider, HistoryProvider};
use yield_safety_domain::entities::{PriceBounds, PriceSeries, Token};
use yield_safety_domain::value_objects::{
    ComponentScores, GasFees, SafetyResult, TokenBoundsSummary, TokenVolatilitySummary,
};

/// One safety assessment request.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyRequest {
    pub token_a: Token,
    pub token_b: Token,
    /// Advertised pool APY in percent points.
    pub pool_apy: f64,
    /// Entry and exit fees; the profitability defaults apply when `None`.
    pub gas_fees: Option<GasFees>,
    /// Confidence level for the bounds; the engine default applies when `None`.
    pub confidence_level: Option<f64>,
}

impl SafetyRequest {
    /// Creates a new request for the pair `token_a`/`token_b`.
    pub fn new(token_a: impl Into<Token>, token_b: impl Into<Token>, pool_apy: f64) -> Self {
        Self {
            token_a: token_a.into(),
            token_b: token_b.into(),
            pool_apy,
            gas_fees: None,
            confidence_level: None,
        }
    }

    #[must_use]
    pub fn with_gas_fees(mut self, gas_fees: GasFees) -> Self {
        self.gas_fees = Some(gas_fees);
        self
    }

    #[must_use]
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }
}

/// Already-fetched inputs of one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub bounds_a: PriceBounds,
    pub bounds_b: PriceBounds,
    pub history_a: PriceSeries,
    pub history_b: PriceSeries,
}

/// Combines IL, correlation, volatility and profitability analysis into a
/// safety score for a liquidity pool.
///
/// The engine holds no state between calls and can serve concurrent
/// requests through a shared reference.
pub struct SafetyEngine<B, H> {
    bounds_provider: B,
    history_provider: H,
    config: EngineConfig,
    il_calculator: IlCalculator,
    correlation_analyzer: CorrelationAnalyzer,
    volatility_analyzer: VolatilityAnalyzer,
    profitability_analyzer: ProfitabilityAnalyzer,
}

impl<B, H> SafetyEngine<B, H> {
    /// Creates a new engine with the default configuration.
    pub fn new(bounds_provider: B, history_provider: H) -> Self {
        Self::build(bounds_provider, history_provider, EngineConfig::default())
    }

    /// Creates a new engine after validating `config`.
    pub fn with_config(bounds_provider: B, history_provider: H, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(bounds_provider, history_provider, config))
    }

    fn build(bounds_provider: B, history_provider: H, config: EngineConfig) -> Self {
        Self {
            il_calculator: IlCalculator::new(config.il.clone()),
            correlation_analyzer: CorrelationAnalyzer::new(config.correlation.clone()),
            volatility_analyzer: VolatilityAnalyzer::new(config.volatility.clone()),
            profitability_analyzer: ProfitabilityAnalyzer::new(config.profitability.clone()),
            bounds_provider,
            history_provider,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_request(&self, request: &SafetyRequest) -> Result<f64, EngineError> {
        for token in [&request.token_a, &request.token_b] {
            if token.symbol.is_empty() {
                return Err(EngineError::InvalidRequest("token symbol is empty".to_string()));
            }
            if !self.config.is_supported(token) {
                return Err(EngineError::UnsupportedToken(token.display_symbol()));
            }
        }
        if !request.pool_apy.is_finite() {
            return Err(EngineError::InvalidRequest(format!(
                "pool APY must be finite, got {}",
                request.pool_apy
            )));
        }
        let confidence_level = request
            .confidence_level
            .unwrap_or(self.config.default_confidence_level);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(EngineError::InvalidRequest(format!(
                "confidence level must be in (0, 1), got {confidence_level}"
            )));
        }
        Ok(confidence_level)
    }

    /// Scores already-fetched market data without calling any provider.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidBounds`] when either token's bounds
    /// violate their invariants.
    pub fn score(&self, request: &SafetyRequest, snapshot: &MarketSnapshot) -> Result<SafetyResult, EngineError> {
        let confidence_level = self.check_request(request)?;

        for (token, bounds) in [
            (&request.token_a, &snapshot.bounds_a),
            (&request.token_b, &snapshot.bounds_b),
        ] {
            bounds.validate().map_err(|source| EngineError::InvalidBounds {
                token: token.display_symbol(),
                source,
            })?;
        }

        let (bounds_a, bounds_b) = (&snapshot.bounds_a, &snapshot.bounds_b);
        let (history_a, history_b) = (&snapshot.history_a, &snapshot.history_b);
        let pool_apy = request.pool_apy;
        let holding_days = self.config.holding_days;
        let gas_fees = request.gas_fees.as_ref();

        // Component 1: forecaster confidence
        let price_confidence = scoring::price_confidence_score(bounds_a.safety_score, bounds_b.safety_score);

        // Component 2: impermanent loss
        let il_range = self.il_calculator.calculate_il_range(bounds_a, bounds_b)?;
        let il_risk = scoring::il_risk_score(il_range.expected_il);
        debug!(
            expected_il = il_range.expected_il,
            worst_il = il_range.worst_il,
            il_risk,
            "IL scenarios evaluated"
        );

        // Component 3: correlation
        let correlation = self
            .correlation_analyzer
            .calculate_correlation(history_a, history_b);
        let correlation_stability = self
            .correlation_analyzer
            .get_correlation_stability(history_a, history_b);
        let correlation_score = self.config.correlation_scores.score(correlation.risk);
        debug!(
            correlation = correlation.correlation,
            risk = %correlation.risk,
            stability = correlation_stability.stability_score,
            "Correlation analyzed"
        );

        // Component 4: volatility
        let volatility_a = self
            .volatility_analyzer
            .calculate_intra_week_volatility(bounds_a, history_a);
        let volatility_b = self
            .volatility_analyzer
            .calculate_intra_week_volatility(bounds_b, history_b);
        let pair_volatility = self
            .volatility_analyzer
            .compare_pair_volatility(history_a, history_b);
        let volatility = scoring::volatility_score(volatility_a.volatility_score, volatility_b.volatility_score);
        debug!(
            score_a = volatility_a.volatility_score,
            score_b = volatility_b.volatility_score,
            volatility,
            "Volatility analyzed"
        );

        // Component 5: profitability
        let breakeven = self
            .profitability_analyzer
            .calculate_breakeven_apy(&il_range, gas_fees, holding_days);
        let profit = self
            .profitability_analyzer
            .calculate_expected_profit(pool_apy, &il_range, gas_fees, holding_days);
        let optimal_holding = self
            .profitability_analyzer
            .calculate_optimal_holding_period(pool_apy, &il_range, gas_fees, None);
        let apy_margin = pool_apy - breakeven.expected_breakeven_apy;
        let profitability = scoring::profitability_score(apy_margin, breakeven.expected_breakeven_apy);

        let component_scores = ComponentScores {
            price_confidence,
            il_risk,
            correlation: correlation_score,
            volatility,
            profitability,
        };
        let total_safety_score = scoring::composite_score(&component_scores, &self.config.weights);
        let recommendation = scoring::recommend(total_safety_score, profitability, &self.config.thresholds);

        info!(
            token_a = %request.token_a,
            token_b = %request.token_b,
            total_safety_score,
            recommendation = %recommendation,
            "Safety score computed"
        );

        let symbol_a = request.token_a.display_symbol();
        let symbol_b = request.token_b.display_symbol();

        Ok(SafetyResult {
            total_safety_score,
            recommendation,
            message: scoring::recommendation_message(recommendation, apy_margin),
            suggested_position_size: recommendation.suggested_position_size(),
            component_scores,
            pool_apy,
            breakeven_apy: breakeven.expected_breakeven_apy,
            expected_net_apy: apy_margin,
            volatility_summary: vec![
                TokenVolatilitySummary {
                    symbol: symbol_a.clone(),
                    weekly_pct: volatility_a.weekly_volatility_pct,
                    risk_level: volatility_a.risk_level,
                },
                TokenVolatilitySummary {
                    symbol: symbol_b.clone(),
                    weekly_pct: volatility_b.weekly_volatility_pct,
                    risk_level: volatility_b.risk_level,
                },
            ],
            il_range,
            correlation,
            correlation_stability,
            volatility_a,
            volatility_b,
            pair_volatility,
            breakeven,
            profit,
            optimal_holding,
            token_a: TokenBoundsSummary::new(symbol_a, bounds_a),
            token_b: TokenBoundsSummary::new(symbol_b, bounds_b),
            confidence_level,
            prediction_horizon_days: holding_days,
        })
    }
}

impl<B, H> SafetyEngine<B, H>
where
    B: BoundsProvider,
    H: HistoryProvider,
{
    async fn fetch_bounds(&self, token: &Token, confidence_level: f64) -> Result<PriceBounds, EngineError> {
        self.bounds_provider
            .get_bounds(token, confidence_level)
            .await
            .map_err(|source| {
                warn!(token = %token, error = %source, "Bounds provider failed");
                EngineError::Bounds {
                    token: token.display_symbol(),
                    source,
                }
            })
    }

    async fn fetch_history(&self, token: &Token) -> Result<PriceSeries, EngineError> {
        self.history_provider
            .get_history(token, self.config.history_days)
            .await
            .map_err(|source| {
                warn!(token = %token, error = %source, "History provider failed");
                EngineError::History {
                    token: token.display_symbol(),
                    source,
                }
            })
    }

    /// Fetches bounds and history for both tokens concurrently.
    ///
    /// The first failure aborts the remaining fetches.
    pub async fn fetch_snapshot(&self, request: &SafetyRequest) -> Result<MarketSnapshot, EngineError> {
        let confidence_level = self.check_request(request)?;
        info!(
            token_a = %request.token_a,
            token_b = %request.token_b,
            confidence_level,
            history_days = self.config.history_days,
            "Fetching market data"
        );

        let (bounds_a, bounds_b, history_a, history_b) = tokio::try_join!(
            self.fetch_bounds(&request.token_a, confidence_level),
            self.fetch_bounds(&request.token_b, confidence_level),
            self.fetch_history(&request.token_a),
            self.fetch_history(&request.token_b),
        )?;

        Ok(MarketSnapshot {
            bounds_a,
            bounds_b,
            history_a,
            history_b,
        })
    }

    /// Computes the complete safety assessment for a token pair.
    ///
    /// # Errors
    /// Fails if the request is invalid, if any provider call fails or if the
    /// returned bounds are invalid.
    pub async fn calculate_safety(&self, request: &SafetyRequest) -> Result<SafetyResult, EngineError> {
        let snapshot = self.fetch_snapshot(request).await?;
        self.score(request, &snapshot)
    }
}
