//! Caller-supplied signal configuration.
//!
//! The engine embeds no defaults for these values. A strategy definition builds
//! a `SignalConfig` once, calls `validate()`, and then passes it by reference
//! to every evaluation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration, reported at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be >= 1")]
    ZeroPeriod { field: &'static str },

    #[error("sma_short_period ({short}) must be less than sma_long_period ({long})")]
    SmaPeriodOrder { short: usize, long: usize },

    #[error("{field} must be a finite value in [0, 100], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("rsi_oversold ({oversold}) must be below rsi_overbought ({overbought})")]
    RsiBandOrder { oversold: f64, overbought: f64 },

    #[error("news_score_threshold must be above 50 so buy and sell bands do not overlap, got {0}")]
    NewsThresholdNotAboveNeutral(f64),

    #[error("weight for {category} must be finite and >= 0, got {value}")]
    InvalidWeight { category: &'static str, value: f64 },

    #[error("at least one category weight must be positive")]
    AllWeightsZero,
}

/// Thresholds controlling technical and sentiment sensitivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalConfig {
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub sma_short_period: usize,
    pub sma_long_period: usize,
    /// Optional long trend filter; rule skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma_trend_period: Option<usize>,
    /// Buy threshold for the sentiment score. The sell threshold is always
    /// `100 - news_score_threshold`.
    pub news_score_threshold: f64,
}

impl SignalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_period("rsi_period", self.rsi_period)?;
        check_period("sma_short_period", self.sma_short_period)?;
        check_period("sma_long_period", self.sma_long_period)?;
        if let Some(trend) = self.sma_trend_period {
            check_period("sma_trend_period", trend)?;
        }
        if self.sma_short_period >= self.sma_long_period {
            return Err(ConfigError::SmaPeriodOrder {
                short: self.sma_short_period,
                long: self.sma_long_period,
            });
        }

        check_threshold("rsi_oversold", self.rsi_oversold)?;
        check_threshold("rsi_overbought", self.rsi_overbought)?;
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(ConfigError::RsiBandOrder {
                oversold: self.rsi_oversold,
                overbought: self.rsi_overbought,
            });
        }

        check_threshold("news_score_threshold", self.news_score_threshold)?;
        if self.news_score_threshold <= 50.0 {
            return Err(ConfigError::NewsThresholdNotAboveNeutral(
                self.news_score_threshold,
            ));
        }
        Ok(())
    }

    /// Sentiment score at or below which the sentiment signal sells.
    pub fn news_sell_threshold(&self) -> f64 {
        100.0 - self.news_score_threshold
    }
}

fn check_period(field: &'static str, period: usize) -> Result<(), ConfigError> {
    if period == 0 {
        return Err(ConfigError::ZeroPeriod { field });
    }
    Ok(())
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ThresholdOutOfRange { field, value });
    }
    Ok(())
}

/// Relative weight of each category in the combined decision.
///
/// Weights need not sum to 1; the combiner normalizes over the categories
/// that actually have data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryWeights {
    pub technical: f64,
    pub sentiment: f64,
    #[serde(default)]
    pub fundamental: f64,
}

impl CategoryWeights {
    /// Technical 0.6, sentiment 0.4, no fundamental feed.
    pub fn technical_led() -> Self {
        Self {
            technical: 0.6,
            sentiment: 0.4,
            fundamental: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (category, value) in [
            ("technical", self.technical),
            ("sentiment", self.sentiment),
            ("fundamental", self.fundamental),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { category, value });
            }
        }
        if self.technical + self.sentiment + self.fundamental <= 0.0 {
            return Err(ConfigError::AllWeightsZero);
        }
        Ok(())
    }
}

/// Everything one evaluation needs: signal thresholds plus category weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    pub signal: SignalConfig,
    pub weights: CategoryWeights,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signal.validate()?;
        self.weights.validate()
    }
}
