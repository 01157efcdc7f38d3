//! Strategy definitions loaded from TOML.
//!
//! A strategy is a name plus a complete `ScoringConfig`. It is validated once
//! when loaded; every replay record carries its fingerprint so a decision can
//! be traced back to the exact thresholds and weights that produced it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradesignal_core::config::{CategoryWeights, ConfigError, ScoringConfig, SignalConfig};

/// Content hash of a strategy definition (blake3, hex).
pub type Fingerprint = String;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("failed to read strategy file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid strategy TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("strategy name must not be empty")]
    EmptyName,

    #[error("invalid strategy configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Named scoring configuration.
///
/// ```toml
/// name = "swing"
///
/// [signal]
/// rsi_period = 14
/// rsi_oversold = 30.0
/// rsi_overbought = 70.0
/// sma_short_period = 5
/// sma_long_period = 10
/// news_score_threshold = 65.0
///
/// [weights]
/// technical = 0.6
/// sentiment = 0.4
/// ```
///
/// Unknown keys are rejected at every level, so a misspelled threshold fails
/// to load instead of silently falling back to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StrategyFile", into = "StrategyFile")]
pub struct StrategyDefinition {
    pub name: String,
    pub scoring: ScoringConfig,
}

/// On-disk layout: `name` plus `[signal]` and `[weights]` tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StrategyFile {
    name: String,
    signal: SignalConfig,
    weights: CategoryWeights,
}

impl From<StrategyFile> for StrategyDefinition {
    fn from(file: StrategyFile) -> Self {
        Self {
            name: file.name,
            scoring: ScoringConfig {
                signal: file.signal,
                weights: file.weights,
            },
        }
    }
}

impl From<StrategyDefinition> for StrategyFile {
    fn from(strategy: StrategyDefinition) -> Self {
        Self {
            name: strategy.name,
            signal: strategy.scoring.signal,
            weights: strategy.scoring.weights,
        }
    }
}

impl StrategyDefinition {
    pub fn new(name: impl Into<String>, scoring: ScoringConfig) -> Result<Self, StrategyError> {
        let strategy = Self {
            name: name.into(),
            scoring,
        };
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn from_toml(text: &str) -> Result<Self, StrategyError> {
        let strategy: Self = toml::from_str(text)?;
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn from_file(path: &Path) -> Result<Self, StrategyError> {
        let text = fs::read_to_string(path).map_err(|source| StrategyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.name.trim().is_empty() {
            return Err(StrategyError::EmptyName);
        }
        self.scoring.validate()?;
        Ok(())
    }

    /// Deterministic hash of the definition.
    ///
    /// Two definitions with identical name, thresholds and weights share a
    /// fingerprint regardless of key order or formatting in the TOML source.
    pub fn fingerprint(&self) -> Fingerprint {
        let json = serde_json::to_string(self).expect("StrategyDefinition serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWING: &str = r#"
name = "swing"

[signal]
rsi_period = 14
rsi_oversold = 30.0
rsi_overbought = 70.0
sma_short_period = 5
sma_long_period = 10
sma_trend_period = 50
news_score_threshold = 65.0

[weights]
technical = 0.6
sentiment = 0.4
"#;

    #[test]
    fn parses_strategy_toml() {
        let s = StrategyDefinition::from_toml(SWING).unwrap();
        assert_eq!(s.name, "swing");
        assert_eq!(s.scoring.signal.rsi_period, 14);
        assert_eq!(s.scoring.signal.sma_trend_period, Some(50));
        assert_eq!(s.scoring.weights.technical, 0.6);
        assert_eq!(s.scoring.weights.fundamental, 0.0);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = StrategyDefinition::from_toml(SWING).unwrap();
        let b = StrategyDefinition::from_toml(SWING).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_ignores_formatting_but_not_values() {
        let base = StrategyDefinition::from_toml(SWING).unwrap();

        let reordered = r#"
name = "swing"
[weights]
sentiment = 0.4
technical = 0.6
[signal]
news_score_threshold = 65.0
sma_trend_period = 50
sma_long_period = 10
sma_short_period = 5
rsi_overbought = 70.0
rsi_oversold = 30.0
rsi_period = 14
"#;
        let same = StrategyDefinition::from_toml(reordered).unwrap();
        assert_eq!(base.fingerprint(), same.fingerprint());

        let changed = StrategyDefinition::from_toml(&SWING.replace("65.0", "70.0")).unwrap();
        assert_ne!(base.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let bad = SWING.replace("news_score_threshold = 65.0", "news_score_threshold = 40.0");
        let err = StrategyDefinition::from_toml(&bad).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::Invalid(ConfigError::NewsThresholdNotAboveNeutral(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let bad = SWING.replace("rsi_period = 14\n", "");
        assert!(matches!(
            StrategyDefinition::from_toml(&bad),
            Err(StrategyError::Parse(_))
        ));
    }

    #[test]
    fn rejects_misspelled_keys() {
        let typo = SWING.replace("sma_trend_period = 50", "sma_trend_perod = 50");
        assert!(matches!(
            StrategyDefinition::from_toml(&typo),
            Err(StrategyError::Parse(_))
        ));

        let top_level = format!("descripton = \"typo\"\n{SWING}");
        assert!(matches!(
            StrategyDefinition::from_toml(&top_level),
            Err(StrategyError::Parse(_))
        ));

        let weights = SWING.replace("sentiment = 0.4", "sentimnet = 0.4");
        assert!(StrategyDefinition::from_toml(&weights).is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let bad = SWING.replace("name = \"swing\"", "name = \"  \"");
        assert!(matches!(
            StrategyDefinition::from_toml(&bad),
            Err(StrategyError::EmptyName)
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = StrategyDefinition::from_file(Path::new("/nonexistent/strategy.toml")).unwrap_err();
        assert!(matches!(err, StrategyError::Read { .. }));
    }
}
