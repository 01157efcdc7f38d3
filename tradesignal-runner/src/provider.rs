//! File-backed price and sentiment collaborators.
//!
//! The scoring engine never fetches anything. These traits are the seams a
//! replay or live bot uses to hand it already-loaded data, so tests and
//! alternative backends can swap implementations freely.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};
use tradesignal_core::domain::{validate_series, Bar, BarError, SentimentDatum};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no price file for '{symbol}' (expected {path})")]
    UnknownSymbol { symbol: String, path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed sentiment JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid bar series for '{symbol}': {source}")]
    InvalidSeries {
        symbol: String,
        #[source]
        source: BarError,
    },
}

/// Source of ascending daily bars for a symbol.
pub trait PriceHistory: Send + Sync {
    /// Full history for `symbol`, oldest first, already validated.
    fn bars(&self, symbol: &str) -> Result<Vec<Bar>, LoadError>;
}

/// Source of aggregate news sentiment.
pub trait SentimentSource: Send + Sync {
    /// Sentiment in effect for `symbol` on `date`, or `None` when uncovered.
    fn sentiment(&self, symbol: &str, date: NaiveDate)
        -> Result<Option<SentimentDatum>, LoadError>;
}

// ── CSV price history ────────────────────────────────────────────────

/// Reads `<dir>/<SYMBOL>.csv` with header `date,open,high,low,close,volume`.
#[derive(Debug, Clone)]
pub struct CsvPriceHistory {
    dir: PathBuf,
}

impl CsvPriceHistory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Symbols with a CSV file in the directory, sorted.
    pub fn symbols(&self) -> Result<Vec<String>, LoadError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| LoadError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                symbols.push(stem.to_string());
            }
        }
        symbols.sort();
        Ok(symbols)
    }
}

impl PriceHistory for CsvPriceHistory {
    fn bars(&self, symbol: &str) -> Result<Vec<Bar>, LoadError> {
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(LoadError::UnknownSymbol {
                symbol: symbol.to_string(),
                path,
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| LoadError::Csv {
                path: path.clone(),
                source,
            })?;

        let mut bars = Vec::new();
        for row in reader.deserialize::<Bar>() {
            let bar = row.map_err(|source| LoadError::Csv {
                path: path.clone(),
                source,
            })?;
            bars.push(bar);
        }

        validate_series(&bars).map_err(|source| LoadError::InvalidSeries {
            symbol: symbol.to_string(),
            source,
        })?;

        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded price history");
        Ok(bars)
    }
}

// ── JSON sentiment file ──────────────────────────────────────────────

pub type SentimentBySymbol = BTreeMap<String, BTreeMap<NaiveDate, SentimentDatum>>;

/// Sentiment snapshots keyed by symbol then date:
/// `{ "AAPL": { "2024-03-01": { "score": 71.0, "label": "bullish", "article_count": 8 } } }`.
///
/// A lookup returns the latest snapshot dated on or before the requested day.
#[derive(Debug, Clone, Default)]
pub struct JsonSentimentFile {
    entries: SentimentBySymbol,
}

impl JsonSentimentFile {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: SentimentBySymbol =
            serde_json::from_str(&text).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            symbols = entries.len(),
            snapshots = entries.values().map(BTreeMap::len).sum::<usize>(),
            "loaded sentiment file"
        );
        Ok(Self { entries })
    }

    pub fn from_entries(entries: SentimentBySymbol) -> Self {
        Self { entries }
    }

    pub fn latest_on_or_before(&self, symbol: &str, date: NaiveDate) -> Option<&SentimentDatum> {
        self.entries
            .get(symbol)?
            .range(..=date)
            .next_back()
            .map(|(_, datum)| datum)
    }
}

impl SentimentSource for JsonSentimentFile {
    fn sentiment(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<SentimentDatum>, LoadError> {
        Ok(self.latest_on_or_before(symbol, date).cloned())
    }
}

/// Sentiment source for runs without a news feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSentiment;

impl SentimentSource for NoSentiment {
    fn sentiment(
        &self,
        _symbol: &str,
        _date: NaiveDate,
    ) -> Result<Option<SentimentDatum>, LoadError> {
        Ok(None)
    }
}
