//! Parallel latest-bar scoring across many symbols.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tradesignal_core::{evaluate, Evaluation};

use crate::config::StrategyDefinition;
use crate::provider::{LoadError, PriceHistory, SentimentSource};

/// Evaluation of one symbol at its most recent bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolScore {
    pub symbol: String,
    /// Date of the last bar, `None` for an empty history.
    pub date: Option<NaiveDate>,
    pub close: Option<f64>,
    pub evaluation: Evaluation,
}

/// A symbol that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub symbol: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Sorted by symbol.
    pub scores: Vec<SymbolScore>,
    /// Sorted by symbol.
    pub failures: Vec<BatchFailure>,
}

/// Load and evaluate a single symbol at its latest bar.
pub fn score_latest(
    symbol: &str,
    prices: &dyn PriceHistory,
    sentiment: &dyn SentimentSource,
    strategy: &StrategyDefinition,
) -> Result<SymbolScore, LoadError> {
    let bars = prices.bars(symbol)?;
    let last = bars.last();
    let news = match last {
        Some(bar) => sentiment.sentiment(symbol, bar.date)?,
        None => None,
    };
    let evaluation = evaluate(&bars, news.as_ref(), &[], &strategy.scoring);
    Ok(SymbolScore {
        symbol: symbol.to_string(),
        date: last.map(|b| b.date),
        close: last.map(|b| b.close),
        evaluation,
    })
}

/// Score every symbol in parallel.
///
/// A failing symbol is reported in `failures` and does not stop the batch.
/// Output order does not depend on thread scheduling.
pub fn score_symbols(
    symbols: &[String],
    prices: &dyn PriceHistory,
    sentiment: &dyn SentimentSource,
    strategy: &StrategyDefinition,
) -> BatchReport {
    let results: Vec<(String, Result<SymbolScore, LoadError>)> = symbols
        .par_iter()
        .map(|symbol| {
            (
                symbol.clone(),
                score_latest(symbol, prices, sentiment, strategy),
            )
        })
        .collect();

    let mut report = BatchReport::default();
    for (symbol, result) in results {
        match result {
            Ok(score) => report.scores.push(score),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "skipping symbol");
                report.failures.push(BatchFailure {
                    symbol,
                    error: e.to_string(),
                });
            }
        }
    }
    report.scores.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    report.failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    info!(
        strategy = %strategy.name,
        scored = report.scores.len(),
        failed = report.failures.len(),
        "batch complete"
    );
    report
}
