//! Indicator library.
//!
//! Indicators are pure functions: close history in, single reading out. They keep
//! no state between calls; a caller that needs a rolling series evaluates once per
//! window end.
//!
//! Short history is not an error. It produces `Reading::Unavailable`, which the
//! generators turn into an explicit "insufficient data" hold.

pub mod rsi;
pub mod sma;

pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};

use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// Output of an indicator evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    Value(f64),
    /// Not enough history: `required` closes are needed, `available` were given.
    Unavailable { required: usize, available: usize },
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Value(v) => Some(v),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Common shape of the single-value indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Minimum number of closes needed for a `Reading::Value`.
    fn required_len(&self) -> usize;

    /// Evaluate at the last element of `closes`.
    fn evaluate(&self, closes: &[f64]) -> Reading;
}

/// Extract the close column from a bar series.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high/low = max/min ± 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
