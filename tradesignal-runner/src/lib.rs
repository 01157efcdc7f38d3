//! tradesignal runner: data collaborators and orchestration.
//!
//! This crate builds on `tradesignal-core` to provide:
//! - CSV price history and JSON sentiment providers behind small traits
//! - TOML strategy definitions with validation and content fingerprints
//! - Day-by-day replay producing JSONL decision records
//! - Parallel latest-bar scoring across many symbols

pub mod batch;
pub mod config;
pub mod provider;
pub mod replay;

pub use batch::{score_latest, score_symbols, BatchFailure, BatchReport, SymbolScore};
pub use config::{Fingerprint, StrategyDefinition, StrategyError};
pub use provider::{
    CsvPriceHistory, JsonSentimentFile, LoadError, NoSentiment, PriceHistory, SentimentSource,
};
pub use replay::{replay, write_jsonl, DecisionRecord, ReplaySummary};
