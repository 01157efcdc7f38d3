//! Relative Strength Index (RSI).
//!
//! Seeds average gain/loss with the simple mean of the first `period` deltas,
//! then applies Wilder smoothing `avg = (avg * (period - 1) + x) / period` for
//! every later delta.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Requires period + 1 closes.
//! Edge case: avg_loss == 0 → RSI = 100 (including a perfectly flat series).

use super::{Indicator, Reading};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_len(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, closes: &[f64]) -> Reading {
        rsi(closes, self.period)
    }
}

/// RSI of `closes` evaluated at the last close.
pub fn rsi(closes: &[f64], period: usize) -> Reading {
    let required = period + 1;
    if period == 0 || closes.len() < required {
        return Reading::Unavailable {
            required,
            available: closes.len(),
        };
    }

    let p = period as f64;
    let mut deltas = closes.windows(2).map(|w| w[1] - w[0]);

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for delta in deltas.by_ref().take(period) {
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss -= delta;
        }
    }
    avg_gain /= p;
    avg_loss /= p;

    for delta in deltas {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
    }

    if avg_loss == 0.0 {
        return Reading::Value(100.0);
    }
    let rs = avg_gain / avg_loss;
    Reading::Value(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains() {
        let result = rsi(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3);
        assert_eq!(result, Reading::Value(100.0));
    }

    #[test]
    fn rsi_all_losses() {
        let result = rsi(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], 3);
        assert_approx(result.value().unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_series_is_100() {
        // Zero average loss is defined as maximal strength, even with zero gain.
        assert_eq!(rsi(&[50.0; 20], 14), Reading::Value(100.0));
    }

    #[test]
    fn rsi_seed_value() {
        // Changes: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        let result = rsi(&[44.0, 44.34, 44.09, 43.61], 3);
        assert_approx(result.value().unwrap(), 31.775_700_934_579_5, 1e-9);
    }

    #[test]
    fn rsi_wilder_step() {
        // Next change +0.72:
        // avg_gain = (0.34/3 * 2 + 0.72) / 3, avg_loss = (0.73/3 * 2) / 3
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);
        assert_approx(result.value().unwrap(), 66.046_511_627_906_9, 1e-9);
    }

    #[test]
    fn rsi_insufficient_history() {
        assert_eq!(
            rsi(&[1.0, 2.0, 3.0], 3),
            Reading::Unavailable {
                required: 4,
                available: 3
            }
        );
        assert!(!rsi(&[], 14).is_available());
    }

    #[test]
    fn rsi_zero_period_is_unavailable() {
        assert!(!rsi(&[1.0, 2.0, 3.0], 0).is_available());
    }

    #[test]
    fn rsi_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        for end in 4..=closes.len() {
            let v = rsi(&closes[..end], 3).value().unwrap();
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {end}: {v}");
        }
    }

    #[test]
    fn rsi_struct_matches_function() {
        let closes = [44.0, 44.34, 44.09, 43.61, 44.33];
        let ind = Rsi::new(3);
        assert_eq!(ind.name(), "rsi_3");
        assert_eq!(ind.required_len(), 4);
        assert_eq!(ind.evaluate(&closes), rsi(&closes, 3));
    }
}
