//! Category signal generation and combination.
//!
//! Each generator turns one kind of input (price history, news sentiment) into
//! a score in [0, 100], an action, and an ordered list of reasons. The combiner
//! merges category results into a single decision using the same
//! tally-or-score rule as the technical generator.
//!
//! Every result is a fresh value. Nothing here holds state between calls, so
//! identical inputs always give identical results.

pub mod combiner;
pub mod sentiment;
pub mod technical;

pub use combiner::{combine, CombinedSignal, Contribution};
pub use sentiment::{SentimentCoverage, SentimentSignal, MIN_ARTICLE_COUNT};
pub use technical::{TechnicalSignal, TechnicalSnapshot, INSUFFICIENT_DATA};

use crate::domain::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting point of every score and the value reported when nothing is known.
pub const NEUTRAL_SCORE: f64 = 50.0;
/// Score at or above which a result is a buy regardless of tallies.
pub const BUY_SCORE: f64 = 70.0;
/// Score at or below which a result is a sell regardless of tallies.
pub const SELL_SCORE: f64 = 30.0;
/// Number of agreeing votes that decides the action regardless of score.
pub const VOTE_THRESHOLD: usize = 2;

/// Tally-or-score classification shared by the technical generator and the
/// combiner.
///
/// Buy wins over sell: `buy` if `buy_votes >= 2 || score >= 70`, else `sell`
/// if `sell_votes >= 2 || score <= 30`, else `hold`.
pub fn decide(score: f64, buy_votes: usize, sell_votes: usize) -> Action {
    if buy_votes >= VOTE_THRESHOLD || score >= BUY_SCORE {
        Action::Buy
    } else if sell_votes >= VOTE_THRESHOLD || score <= SELL_SCORE {
        Action::Sell
    } else {
        Action::Hold
    }
}

/// Clamp a raw score into [0, 100].
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Kind of evidence behind a category signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Sentiment,
    Fundamental,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Sentiment => "sentiment",
            Self::Fundamental => "fundamental",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Category-neutral view of a signal result, as consumed by the combiner.
///
/// `has_data` is false when the generator fell back to a neutral hold because
/// its input was missing or too thin. Such results are skipped by the combiner
/// rather than counted as neutral votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySignal {
    pub category: Category,
    pub action: Action,
    pub score: f64,
    pub reasons: Vec<String>,
    pub has_data: bool,
}

impl CategorySignal {
    /// A category result supplied by an external scorer (e.g. fundamentals).
    pub fn external(category: Category, score: f64, reasons: Vec<String>) -> Self {
        let score = clamp_score(score);
        Self {
            category,
            action: decide(score, 0, 0),
            score,
            reasons,
            has_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decide_score_thresholds_are_inclusive() {
        assert_eq!(decide(70.0, 0, 0), Action::Buy);
        assert_eq!(decide(69.9, 0, 0), Action::Hold);
        assert_eq!(decide(30.0, 0, 0), Action::Sell);
        assert_eq!(decide(30.1, 0, 0), Action::Hold);
    }

    #[test]
    fn decide_votes_override_score() {
        assert_eq!(decide(55.0, 2, 0), Action::Buy);
        assert_eq!(decide(45.0, 0, 2), Action::Sell);
    }

    #[test]
    fn decide_buy_checked_before_sell() {
        // Two buy votes beat two sell votes, and beat a low score.
        assert_eq!(decide(20.0, 2, 2), Action::Buy);
        // A high score beats two sell votes.
        assert_eq!(decide(75.0, 0, 2), Action::Buy);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(105.0), 100.0);
        assert_eq!(clamp_score(42.0), 42.0);
    }

    #[test]
    fn external_signal_classifies_by_score() {
        let s = CategorySignal::external(Category::Fundamental, 82.0, vec!["cheap".into()]);
        assert_eq!(s.action, Action::Buy);
        assert!(s.has_data);
        let s = CategorySignal::external(Category::Fundamental, 140.0, Vec::new());
        assert_eq!(s.score, 100.0);
    }
}
