//! Domain types shared by every layer of the engine.

pub mod action;
pub mod bar;
pub mod sentiment;

pub use action::Action;
pub use bar::{validate_series, Bar, BarError};
pub use sentiment::{EmptyLabel, SentimentDatum, SentimentLabel};
