//! One-call evaluation: technical + sentiment + combined decision.
//!
//! This is the entry point shared by the backtest replay and a live bot. Both
//! hand over already-fetched data and get back all three layers of the
//! decision, so the combined action can always be traced to its inputs.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::domain::{Bar, SentimentDatum};
use crate::signals::{
    combine, sentiment, technical, CategorySignal, CombinedSignal, SentimentSignal,
    TechnicalSignal,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub technical: TechnicalSignal,
    pub sentiment: SentimentSignal,
    pub combined: CombinedSignal,
}

/// Evaluate at the last bar of `bars`.
///
/// `extra` carries category results scored outside this crate (for example a
/// fundamental score); they are combined after technical and sentiment.
pub fn evaluate(
    bars: &[Bar],
    news: Option<&SentimentDatum>,
    extra: &[CategorySignal],
    config: &ScoringConfig,
) -> Evaluation {
    let technical = technical::generate(bars, &config.signal);
    let sentiment = sentiment::generate(news, &config.signal);

    let mut categories = Vec::with_capacity(2 + extra.len());
    categories.push(CategorySignal::from(&technical));
    categories.push(CategorySignal::from(&sentiment));
    categories.extend_from_slice(extra);

    let combined = combine(&categories, &config.weights);
    Evaluation {
        technical,
        sentiment,
        combined,
    }
}
