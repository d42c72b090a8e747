//! Player score ledger: one record per scored round plus a running total.

use serde::{Deserialize, Serialize};

use crate::scoring::Category;

/// One scored round. `total` is the player's running total after the
/// round was applied; `player` repeats the owner's name so flattened
/// histories from several players remain attributable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub round: u32,
    pub score: u32,
    pub category: String,
    pub total: u32,
    pub player: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub score_history: Vec<ScoreRecord>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            score_history: Vec::new(),
        }
    }

    /// Apply a round result: bump the total and append the record.
    pub fn add_score(&mut self, round: u32, score: u32, category: Category) {
        self.score += score;
        self.score_history.push(ScoreRecord {
            round,
            score,
            category: category.as_str().to_string(),
            total: self.score,
            player: self.name.clone(),
        });
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} points", self.name, self.score)
    }
}
