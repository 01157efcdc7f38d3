//! Technical signal: RSI and moving-average rules over close history.
//!
//! Score starts at 50 and is moved by additive rules evaluated in a fixed order:
//! 1. RSI below `rsi_oversold`: +20, buy vote.
//! 2. else RSI above `rsi_overbought`: -20, sell vote.
//! 3. else RSI below 45: +5.
//! 4. short SMA above long SMA (golden cross): +15, buy vote;
//!    otherwise (death cross): -15, sell vote.
//! 5. price below long SMA and RSI below 40 (deep value): +10, buy vote.
//! 6. trend SMA configured and available, price above it: +5.
//!
//! Reasons are appended in exactly that order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{clamp_score, decide, Category, CategorySignal, NEUTRAL_SCORE};
use crate::config::SignalConfig;
use crate::domain::{Action, Bar};
use crate::indicators::{closes, rsi, sma};

/// Reason reported when RSI or the short/long SMA cannot be computed.
pub const INSUFFICIENT_DATA: &str = "insufficient data";

const RSI_OVERSOLD_POINTS: f64 = 20.0;
const RSI_OVERBOUGHT_POINTS: f64 = -20.0;
const RSI_MILD_LOW: f64 = 45.0;
const RSI_MILD_LOW_POINTS: f64 = 5.0;
const CROSS_POINTS: f64 = 15.0;
const DEEP_VALUE_RSI: f64 = 40.0;
const DEEP_VALUE_POINTS: f64 = 10.0;
const TREND_POINTS: f64 = 5.0;

/// Indicator values the technical score was computed from.
///
/// When history is too short, missing SMA values are reported as the current
/// price and a missing RSI as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub price: f64,
    pub rsi: Option<f64>,
    pub sma_short: f64,
    pub sma_long: f64,
    pub sma_trend: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignal {
    pub action: Action,
    pub score: f64,
    pub reasons: Vec<String>,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub snapshot: TechnicalSnapshot,
    pub insufficient_data: bool,
}

/// Score bars (ascending by date) against `config`.
pub fn generate(bars: &[Bar], config: &SignalConfig) -> TechnicalSignal {
    let closes = closes(bars);
    let price = closes.last().copied().unwrap_or(0.0);

    let rsi = rsi(&closes, config.rsi_period).value();
    let sma_short = sma(&closes, config.sma_short_period).value();
    let sma_long = sma(&closes, config.sma_long_period).value();
    let sma_trend = config
        .sma_trend_period
        .and_then(|period| sma(&closes, period).value());

    let (rsi_value, short, long) = match (rsi, sma_short, sma_long) {
        (Some(r), Some(s), Some(l)) => (r, s, l),
        _ => {
            debug!(
                bars = bars.len(),
                rsi_period = config.rsi_period,
                sma_long_period = config.sma_long_period,
                "technical signal: insufficient history"
            );
            return TechnicalSignal {
                action: Action::Hold,
                score: NEUTRAL_SCORE,
                reasons: vec![INSUFFICIENT_DATA.to_string()],
                buy_signals: 0,
                sell_signals: 0,
                snapshot: TechnicalSnapshot {
                    price,
                    rsi,
                    sma_short: sma_short.unwrap_or(price),
                    sma_long: sma_long.unwrap_or(price),
                    sma_trend,
                },
                insufficient_data: true,
            };
        }
    };

    let mut score = NEUTRAL_SCORE;
    let mut buy_signals = 0;
    let mut sell_signals = 0;
    let mut reasons = Vec::new();

    if rsi_value < config.rsi_oversold {
        score += RSI_OVERSOLD_POINTS;
        buy_signals += 1;
        reasons.push(format!(
            "RSI oversold ({rsi_value:.1} < {})",
            config.rsi_oversold
        ));
    } else if rsi_value > config.rsi_overbought {
        score += RSI_OVERBOUGHT_POINTS;
        sell_signals += 1;
        reasons.push(format!(
            "RSI overbought ({rsi_value:.1} > {})",
            config.rsi_overbought
        ));
    } else if rsi_value < RSI_MILD_LOW {
        score += RSI_MILD_LOW_POINTS;
        reasons.push(format!("RSI leaning low ({rsi_value:.1} < {RSI_MILD_LOW})"));
    }

    if short > long {
        score += CROSS_POINTS;
        buy_signals += 1;
        reasons.push(format!(
            "Golden cross: SMA{} {short:.2} > SMA{} {long:.2}",
            config.sma_short_period, config.sma_long_period
        ));
    } else {
        score -= CROSS_POINTS;
        sell_signals += 1;
        reasons.push(format!(
            "Death cross: SMA{} {short:.2} <= SMA{} {long:.2}",
            config.sma_short_period, config.sma_long_period
        ));
    }

    if price < long && rsi_value < DEEP_VALUE_RSI {
        score += DEEP_VALUE_POINTS;
        buy_signals += 1;
        reasons.push(format!(
            "Deep value: price {price:.2} below SMA{} {long:.2} with RSI {rsi_value:.1}",
            config.sma_long_period
        ));
    }

    if let (Some(trend), Some(period)) = (sma_trend, config.sma_trend_period) {
        if price > trend {
            score += TREND_POINTS;
            reasons.push(format!(
                "Price {price:.2} above SMA{period} trend {trend:.2}"
            ));
        }
    }

    let score = clamp_score(score);
    let action = decide(score, buy_signals, sell_signals);
    debug!(
        %action,
        score,
        buy_signals,
        sell_signals,
        rsi = rsi_value,
        "technical signal evaluated"
    );

    TechnicalSignal {
        action,
        score,
        reasons,
        buy_signals,
        sell_signals,
        snapshot: TechnicalSnapshot {
            price,
            rsi: Some(rsi_value),
            sma_short: short,
            sma_long: long,
            sma_trend,
        },
        insufficient_data: false,
    }
}

impl From<&TechnicalSignal> for CategorySignal {
    fn from(signal: &TechnicalSignal) -> Self {
        Self {
            category: Category::Technical,
            action: signal.action,
            score: signal.score,
            reasons: signal.reasons.clone(),
            has_data: !signal.insufficient_data,
        }
    }
}
