//! Bar: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily OHLCV bar.
///
/// The indicators only read `close`; the remaining fields are kept so range and
/// volume based indicators can be added without changing the input shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if any price field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Structural problems in a bar series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("bar {index} ({date}) is not after the previous bar ({previous})")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("duplicate bar for {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("bar {index} ({date}) has a NaN price")]
    VoidBar { index: usize, date: NaiveDate },

    #[error("bar {index} ({date}) has inconsistent OHLC prices")]
    InsaneBar { index: usize, date: NaiveDate },
}

/// Check that a series is strictly increasing by date and every bar has
/// finite, positive, internally consistent prices.
///
/// This is a load-time check. The scoring path assumes it has already passed.
pub fn validate_series(bars: &[Bar]) -> Result<(), BarError> {
    for (index, bar) in bars.iter().enumerate() {
        if bar.is_void() {
            return Err(BarError::VoidBar {
                index,
                date: bar.date,
            });
        }
        if !bar.is_sane() {
            return Err(BarError::InsaneBar {
                index,
                date: bar.date,
            });
        }
        if index == 0 {
            continue;
        }
        let previous = bars[index - 1].date;
        if bar.date == previous {
            return Err(BarError::DuplicateDate {
                index,
                date: bar.date,
            });
        }
        if bar.date < previous {
            return Err(BarError::OutOfOrder {
                index,
                date: bar.date,
                previous,
            });
        }
    }
    Ok(())
}
