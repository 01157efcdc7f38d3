//! Aggregate news sentiment for a symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Categorical sentiment label attached to an aggregate score.
///
/// Serialized in kebab case (`somewhat-bullish`). Parsing is case-insensitive and
/// accepts `_`, `-` or a space between words, which covers the spellings used by
/// the common news-sentiment feeds. Labels outside the five known levels are
/// kept as `Other` in normalized form; the label never drives scoring, so one
/// unfamiliar feed label must not reject the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SentimentLabel {
    Bearish,
    SomewhatBearish,
    Neutral,
    SomewhatBullish,
    Bullish,
    Other(String),
}

impl SentimentLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bearish => "bearish",
            Self::SomewhatBearish => "somewhat-bearish",
            Self::Neutral => "neutral",
            Self::SomewhatBullish => "somewhat-bullish",
            Self::Bullish => "bullish",
            Self::Other(label) => label,
        }
    }

    /// True for one of the five known levels.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sentiment label must not be empty")]
pub struct EmptyLabel;

impl FromStr for SentimentLabel {
    type Err = EmptyLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "" => Err(EmptyLabel),
            "bearish" => Ok(Self::Bearish),
            "somewhat-bearish" => Ok(Self::SomewhatBearish),
            "neutral" => Ok(Self::Neutral),
            "somewhat-bullish" => Ok(Self::SomewhatBullish),
            "bullish" => Ok(Self::Bullish),
            _ => Ok(Self::Other(normalized)),
        }
    }
}

impl TryFrom<String> for SentimentLabel {
    type Error = EmptyLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Aggregate sentiment reading for one symbol and date.
///
/// `score` is on a 0–100 scale (50 = neutral). Absence of coverage is modelled
/// as `Option<SentimentDatum>` by callers, never as a zeroed datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDatum {
    pub score: f64,
    pub label: SentimentLabel,
    pub article_count: u32,
}

impl SentimentDatum {
    pub fn new(score: f64, label: SentimentLabel, article_count: u32) -> Self {
        Self {
            score,
            label,
            article_count,
        }
    }
}
