//! Deterministic scoring for a finalized twelve-die configuration.
//!
//! `calculate_score` is a pure function of the twelve values: bonuses are
//! additive (repeats, straight, and the multiple-pairs/triples extras all
//! stack), while the category label is resolved with the per-count rules
//! taking precedence over the straight label, which takes precedence over
//! the `chance` default.

use std::fmt;

use thiserror::Error;

/// Number of distinct die faces.
pub const FACES: usize = 6;

use crate::pool::DICE_COUNT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("scoring requires exactly 12 dice, got {got}")]
    InvalidDiceCount { got: usize },
}

/// Scoring-pattern label for a finalized configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Chance,
    SinglePair,
    MultiplePairs,
    ThreeOfAKind,
    MultipleTriples,
    FourOfAKind,
    FiveOrMoreOfAKind,
    Straight3,
    Straight4,
    Straight5,
    Straight6,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chance => "chance",
            Category::SinglePair => "single_pair",
            Category::MultiplePairs => "multiple_pairs",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::MultipleTriples => "multiple_triples",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FiveOrMoreOfAKind => "five_or_more_of_a_kind",
            Category::Straight3 => "straight_3",
            Category::Straight4 => "straight_4",
            Category::Straight5 => "straight_5",
            Category::Straight6 => "straight_6",
        }
    }

    fn straight(len: u8) -> Option<Category> {
        match len {
            3 => Some(Category::Straight3),
            4 => Some(Category::Straight4),
            5 => Some(Category::Straight5),
            6 => Some(Category::Straight6),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of `calculate_score`.
///
/// `counts[face - 1]` is the occurrence count of `face`; counts sum to 12
/// when every input value is a valid face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub category: Category,
    pub score: u32,
    pub counts: [u8; FACES],
}

/// Per-face occurrence counts. Values outside 1..=6 are dropped, not
/// rejected; malformed input therefore yields counts summing to less
/// than twelve rather than an error.
fn face_counts(values: &[u8]) -> [u8; FACES] {
    let mut counts = [0u8; FACES];
    for &v in values {
        if (1..=6).contains(&v) {
            counts[v as usize - 1] += 1;
        }
    }
    counts
}

/// Classify a twelve-die configuration into a category and score.
pub fn calculate_score(values: &[u8]) -> Result<ScoreResult, ScoreError> {
    if values.len() != DICE_COUNT {
        return Err(ScoreError::InvalidDiceCount { got: values.len() });
    }

    let counts = face_counts(values);
    let mut score: u32 = 0;
    let mut category = Category::Chance;

    // Repeat bonus, once per face, additive across faces.
    for &count in &counts {
        score += match count {
            0 | 1 => 0,
            2 => 5,
            3 => 10,
            4 => 20,
            _ => 30,
        };
    }

    // Longest run of consecutive faces each present at least once.
    let mut longest = 0u8;
    let mut run = 0u8;
    for &count in &counts {
        if count > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    if let Some(straight) = Category::straight(longest) {
        score += match longest {
            3 => 10,
            4 => 20,
            5 => 30,
            _ => 50,
        };
        category = straight;
    }

    // Category resolution by highest per-face count; the stacking bonuses
    // for multiple triples/pairs add on top of everything above.
    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count >= 5 {
        category = Category::FiveOrMoreOfAKind;
    } else if max_count == 4 {
        category = Category::FourOfAKind;
    } else if max_count == 3 {
        let triples = counts.iter().filter(|&&c| c >= 3).count();
        if triples >= 2 {
            category = Category::MultipleTriples;
            score += 15;
        } else {
            category = Category::ThreeOfAKind;
        }
    } else if max_count == 2 {
        let pairs = counts.iter().filter(|&&c| c >= 2).count();
        if pairs >= 3 {
            category = Category::MultiplePairs;
            score += 10;
        }
    }

    // Floor for holding any repeat at all. Any count >= 2 already earned a
    // repeat bonus, so this only fires on malformed (short-counted) input.
    if score == 0 && max_count >= 2 {
        score = 5;
        category = Category::SinglePair;
    }

    Ok(ScoreResult {
        category,
        score,
        counts,
    })
}

/// Advisory analysis of a roll in progress. Never fails and never feeds
/// back into `calculate_score`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceAnalysis {
    pub counts: [u8; FACES],
    pub suggestions: Vec<String>,
    pub total: u32,
}

/// Suggest dice worth keeping: the top three faces held at least twice,
/// plus a near-straight hint when two or fewer faces are missing entirely.
pub fn analyze_dice(values: &[u8]) -> DiceAnalysis {
    let counts = face_counts(values);

    let mut by_count: Vec<(u8, u8)> = (1..=6usize).map(|f| (f as u8, counts[f - 1])).collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1));

    let mut suggestions = Vec::new();
    for &(face, count) in by_count.iter().take(3) {
        if count >= 2 {
            suggestions.push(format!("Keep the {count} dice showing {face}"));
        }
    }

    let missing: Vec<u8> = (1..=6u8).filter(|&f| counts[f as usize - 1] == 0).collect();
    if missing.len() <= 2 {
        suggestions.push(format!("Near straight: need {missing:?}"));
    }

    let total = values.iter().map(|&v| u32::from(v)).sum();
    DiceAnalysis {
        counts,
        suggestions,
        total,
    }
}
