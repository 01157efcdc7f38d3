//! tradesignal core: deterministic signal scoring.
//!
//! This crate is the part shared by the backtest replay and the live bot:
//! - Domain types (bars, sentiment data, actions)
//! - Indicator library (RSI, SMA) with explicit "unavailable" readings
//! - Technical and sentiment signal generators (score, action, ordered reasons)
//! - Weighted combiner producing the final decision
//! - Configuration types validated once at strategy-definition time
//!
//! Every function here is pure: no I/O, no clock, no shared state.

pub mod config;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;

pub use config::{CategoryWeights, ConfigError, ScoringConfig, SignalConfig};
pub use domain::{Action, Bar, SentimentDatum, SentimentLabel};
pub use engine::{evaluate, Evaluation};
