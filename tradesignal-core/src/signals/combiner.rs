//! Signal combiner: merges category signals into one decision.
//!
//! Only categories that have data and a positive weight contribute. The
//! combined score is the weight-normalized mean of contributor scores, and the
//! action follows the same rule as the technical generator with each
//! contributor's action counted as one vote.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{clamp_score, decide, Category, CategorySignal, NEUTRAL_SCORE};
use crate::config::CategoryWeights;
use crate::domain::Action;

/// One category's share of the combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub category: Category,
    /// Weight after normalization over the contributing categories.
    pub weight: f64,
    pub score: f64,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSignal {
    pub action: Action,
    pub score: f64,
    pub reasons: Vec<String>,
    pub contributions: Vec<Contribution>,
    pub buy_votes: usize,
    pub sell_votes: usize,
}

impl CategoryWeights {
    pub fn weight_for(&self, category: Category) -> f64 {
        match category {
            Category::Technical => self.technical,
            Category::Sentiment => self.sentiment,
            Category::Fundamental => self.fundamental,
        }
    }
}

/// Combine category signals, in the order given, into one decision.
pub fn combine(signals: &[CategorySignal], weights: &CategoryWeights) -> CombinedSignal {
    let mut reasons = Vec::new();
    let mut contributors: Vec<(&CategorySignal, f64)> = Vec::new();

    for signal in signals {
        let weight = weights.weight_for(signal.category);
        if !signal.has_data {
            reasons.push(format!("{}: no data, excluded", signal.category));
        } else if weight <= 0.0 {
            reasons.push(format!("{}: zero weight, excluded", signal.category));
        } else {
            contributors.push((signal, weight));
        }
    }

    if contributors.is_empty() {
        reasons.push("No category data available".to_string());
        return CombinedSignal {
            action: Action::Hold,
            score: NEUTRAL_SCORE,
            reasons,
            contributions: Vec::new(),
            buy_votes: 0,
            sell_votes: 0,
        };
    }

    let total_weight: f64 = contributors.iter().map(|(_, w)| w).sum();
    let mut weighted_sum = 0.0;
    let mut buy_votes = 0;
    let mut sell_votes = 0;
    let mut contributions = Vec::with_capacity(contributors.len());

    for (signal, weight) in &contributors {
        let normalized = weight / total_weight;
        weighted_sum += weight * signal.score;
        match signal.action {
            Action::Buy => buy_votes += 1,
            Action::Sell => sell_votes += 1,
            Action::Hold => {}
        }
        reasons.push(format!(
            "{}: {} (score {:.1}, weight {:.2})",
            signal.category, signal.action, signal.score, normalized
        ));
        contributions.push(Contribution {
            category: signal.category,
            weight: normalized,
            score: signal.score,
            action: signal.action,
        });
    }

    let score = clamp_score(weighted_sum / total_weight);
    let action = decide(score, buy_votes, sell_votes);
    reasons.push(format!(
        "Combined score {score:.1} with {buy_votes} buy / {sell_votes} sell votes"
    ));
    debug!(%action, score, buy_votes, sell_votes, "combined signal evaluated");

    CombinedSignal {
        action,
        score,
        reasons,
        contributions,
        buy_votes,
        sell_votes,
    }
}
