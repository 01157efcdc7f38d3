//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the most recent `period` closes. Requires `period` closes.

use super::{Indicator, Reading};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_len(&self) -> usize {
        self.period
    }

    fn evaluate(&self, closes: &[f64]) -> Reading {
        sma(closes, self.period)
    }
}

/// SMA of `closes` evaluated at the last close.
pub fn sma(closes: &[f64], period: usize) -> Reading {
    if period == 0 || closes.len() < period {
        return Reading::Unavailable {
            required: period.max(1),
            available: closes.len(),
        };
    }
    let window = &closes[closes.len() - period..];
    let sum: f64 = window.iter().sum();
    Reading::Value(sum / period as f64)
}
