//! Sentiment signal: aggregate news sentiment mapped onto buy/sell/hold.
//!
//! Thresholds are symmetric around 50: buy at `score >= T`, sell at
//! `score <= 100 - T`, where `T` is `news_score_threshold`. Readings built
//! from fewer than `MIN_ARTICLE_COUNT` articles are treated like missing data.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{clamp_score, Category, CategorySignal, NEUTRAL_SCORE};
use crate::config::SignalConfig;
use crate::domain::{Action, SentimentDatum, SentimentLabel};

/// Minimum number of articles behind a sentiment reading before it can move
/// a decision.
pub const MIN_ARTICLE_COUNT: u32 = 3;

/// How much sentiment evidence was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentCoverage {
    /// No datum for the symbol/date.
    Absent,
    /// A datum exists but rests on too few articles.
    BelowMinimum,
    /// The datum was scored.
    Scored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub action: Action,
    pub score: f64,
    pub reasons: Vec<String>,
    pub label: SentimentLabel,
    pub article_count: u32,
    pub coverage: SentimentCoverage,
}

impl SentimentSignal {
    fn neutral(article_count: u32, coverage: SentimentCoverage, reason: String) -> Self {
        Self {
            action: Action::Hold,
            score: NEUTRAL_SCORE,
            reasons: vec![reason],
            label: SentimentLabel::Neutral,
            article_count,
            coverage,
        }
    }
}

/// Score a sentiment datum (or its absence) against `config`.
pub fn generate(data: Option<&SentimentDatum>, config: &SignalConfig) -> SentimentSignal {
    let Some(datum) = data else {
        return SentimentSignal::neutral(
            0,
            SentimentCoverage::Absent,
            "No sentiment data available".to_string(),
        );
    };

    if datum.article_count < MIN_ARTICLE_COUNT {
        debug!(
            article_count = datum.article_count,
            "sentiment signal: below minimum article count"
        );
        return SentimentSignal::neutral(
            datum.article_count,
            SentimentCoverage::BelowMinimum,
            format!(
                "Only {} articles, minimum {MIN_ARTICLE_COUNT} required",
                datum.article_count
            ),
        );
    }

    let score = clamp_score(datum.score);
    let buy_at = config.news_score_threshold;
    let sell_at = config.news_sell_threshold();

    let (action, rationale) = if score >= buy_at {
        (
            Action::Buy,
            format!("Sentiment score {score:.1} >= {buy_at} (bullish threshold)"),
        )
    } else if score <= sell_at {
        (
            Action::Sell,
            format!("Sentiment score {score:.1} <= {sell_at} (bearish threshold)"),
        )
    } else {
        (
            Action::Hold,
            format!("Sentiment score {score:.1} between {sell_at} and {buy_at}"),
        )
    };
    debug!(%action, score, article_count = datum.article_count, "sentiment signal evaluated");

    SentimentSignal {
        action,
        score,
        reasons: vec![
            rationale,
            format!(
                "Based on {} articles ({})",
                datum.article_count, datum.label
            ),
        ],
        label: datum.label.clone(),
        article_count: datum.article_count,
        coverage: SentimentCoverage::Scored,
    }
}

impl From<&SentimentSignal> for CategorySignal {
    fn from(signal: &SentimentSignal) -> Self {
        Self {
            category: Category::Sentiment,
            action: signal.action,
            score: signal.score,
            reasons: signal.reasons.clone(),
            has_data: signal.coverage == SentimentCoverage::Scored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SignalConfig {
        SignalConfig {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            sma_short_period: 5,
            sma_long_period: 10,
            sma_trend_period: None,
            news_score_threshold: 65.0,
        }
    }

    fn datum(score: f64, article_count: u32) -> SentimentDatum {
        SentimentDatum::new(score, SentimentLabel::Bullish, article_count)
    }

    #[test]
    fn absent_data_holds() {
        let signal = generate(None, &config());
        assert_eq!(signal.action, Action::Hold);
        assert_eq!(signal.score, 50.0);
        assert_eq!(signal.label, SentimentLabel::Neutral);
        assert_eq!(signal.article_count, 0);
        assert_eq!(signal.coverage, SentimentCoverage::Absent);
        assert_eq!(signal.reasons, vec!["No sentiment data available".to_string()]);
    }

    #[test]
    fn thin_coverage_holds_regardless_of_score() {
        let signal = generate(Some(&datum(95.0, 2)), &config());
        assert_eq!(signal.action, Action::Hold);
        assert_eq!(signal.score, 50.0);
        assert_eq!(signal.label, SentimentLabel::Neutral);
        assert_eq!(signal.article_count, 2);
        assert_eq!(signal.coverage, SentimentCoverage::BelowMinimum);
        assert_eq!(
            signal.reasons,
            vec!["Only 2 articles, minimum 3 required".to_string()]
        );
    }

    #[test]
    fn bullish_score_buys() {
        let signal = generate(Some(&datum(80.0, 10)), &config());
        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.score, 80.0);
        assert_eq!(signal.label, SentimentLabel::Bullish);
        assert_eq!(
            signal.reasons,
            vec![
                "Sentiment score 80.0 >= 65 (bullish threshold)".to_string(),
                "Based on 10 articles (bullish)".to_string(),
            ]
        );
    }

    #[test]
    fn thresholds_are_symmetric() {
        let cfg = config();
        assert_eq!(generate(Some(&datum(65.0, 3)), &cfg).action, Action::Buy);
        assert_eq!(generate(Some(&datum(35.0, 3)), &cfg).action, Action::Sell);
        for score in [35.1, 40.0, 50.0, 60.0, 64.9] {
            assert_eq!(
                generate(Some(&datum(score, 3)), &cfg).action,
                Action::Hold,
                "score {score} should hold"
            );
        }
    }

    #[test]
    fn bearish_and_neutral_rationales() {
        let sell = generate(
            Some(&SentimentDatum::new(20.0, SentimentLabel::Bearish, 7)),
            &config(),
        );
        assert_eq!(sell.reasons[0], "Sentiment score 20.0 <= 35 (bearish threshold)");
        assert_eq!(sell.reasons[1], "Based on 7 articles (bearish)");

        let hold = generate(
            Some(&SentimentDatum::new(52.0, SentimentLabel::Neutral, 4)),
            &config(),
        );
        assert_eq!(hold.reasons[0], "Sentiment score 52.0 between 35 and 65");
    }

    #[test]
    fn out_of_range_score_is_clamped() {
        let signal = generate(Some(&datum(130.0, 5)), &config());
        assert_eq!(signal.score, 100.0);
        assert_eq!(signal.action, Action::Buy);
    }

    #[test]
    fn category_view_excludes_thin_coverage() {
        let thin = generate(Some(&datum(95.0, 1)), &config());
        assert!(!CategorySignal::from(&thin).has_data);
        let scored = generate(Some(&datum(95.0, 3)), &config());
        let view = CategorySignal::from(&scored);
        assert!(view.has_data);
        assert_eq!(view.category, Category::Sentiment);
        assert_eq!(view.action, Action::Buy);
    }
}
