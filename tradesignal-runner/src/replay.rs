//! Day-by-day replay of a strategy over a price history.
//!
//! At bar `i` the engine sees `bars[..=i]` and the sentiment in effect on that
//! bar's date, nothing later. Each decision becomes one `DecisionRecord`,
//! written as JSON lines so a replay can be diffed against a live bot's log.

use std::io::{self, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tradesignal_core::domain::{Action, Bar};
use tradesignal_core::{evaluate, Evaluation};

use crate::config::{Fingerprint, StrategyDefinition};
use crate::provider::{LoadError, SentimentSource};

/// One replayed decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub close: f64,
    pub action: Action,
    pub score: f64,
    pub buy_votes: usize,
    pub sell_votes: usize,
    pub technical_action: Action,
    pub technical_score: f64,
    pub sentiment_action: Action,
    pub sentiment_score: f64,
    pub reasons: Vec<String>,
    pub strategy: Fingerprint,
}

impl DecisionRecord {
    fn from_evaluation(symbol: &str, bar: &Bar, eval: Evaluation, strategy: &str) -> Self {
        Self {
            date: bar.date,
            symbol: symbol.to_string(),
            close: bar.close,
            action: eval.combined.action,
            score: eval.combined.score,
            buy_votes: eval.combined.buy_votes,
            sell_votes: eval.combined.sell_votes,
            technical_action: eval.technical.action,
            technical_score: eval.technical.score,
            sentiment_action: eval.sentiment.action,
            sentiment_score: eval.sentiment.score,
            reasons: eval.combined.reasons,
            strategy: strategy.to_string(),
        }
    }
}

/// Action counts over a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub buys: usize,
    pub sells: usize,
    pub holds: usize,
}

impl ReplaySummary {
    pub fn from_records(records: &[DecisionRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut acc, r| {
                match r.action {
                    Action::Buy => acc.buys += 1,
                    Action::Sell => acc.sells += 1,
                    Action::Hold => acc.holds += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.buys + self.sells + self.holds
    }
}

/// Evaluate `strategy` at every bar of `bars`.
///
/// Sentiment lookup failures abort the replay; insufficient history does not
/// (early bars simply hold).
pub fn replay(
    symbol: &str,
    bars: &[Bar],
    sentiment: &dyn SentimentSource,
    strategy: &StrategyDefinition,
) -> Result<Vec<DecisionRecord>, LoadError> {
    let fingerprint = strategy.fingerprint();
    let mut records = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let news = sentiment.sentiment(symbol, bar.date)?;
        let eval = evaluate(&bars[..=i], news.as_ref(), &[], &strategy.scoring);
        debug!(
            symbol,
            date = %bar.date,
            action = %eval.combined.action,
            score = eval.combined.score,
            "replayed bar"
        );
        records.push(DecisionRecord::from_evaluation(symbol, bar, eval, &fingerprint));
    }

    let summary = ReplaySummary::from_records(&records);
    info!(
        symbol,
        strategy = %strategy.name,
        bars = records.len(),
        buys = summary.buys,
        sells = summary.sells,
        holds = summary.holds,
        "replay complete"
    );
    Ok(records)
}

/// Write records as JSON lines.
pub fn write_jsonl<W: Write>(records: &[DecisionRecord], mut writer: W) -> io::Result<()> {
    for record in records {
        let json = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()
}
