//! Aggregate statistics over per-round scores.

use naasii_core::Player;

/// Five-number summary of a score sequence. `std_dev` is the population
/// standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

pub fn summarize(scores: &[u32]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
    let variance = scores
        .iter()
        .map(|&s| {
            let d = f64::from(s) - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    };

    Some(ScoreSummary {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub total_score: u32,
    pub rounds_played: usize,
    pub summary: Option<ScoreSummary>,
    pub best_score: Option<u32>,
    /// Category of the earliest best-scoring round.
    pub best_category: Option<String>,
    /// Ties resolve to the category seen first in the history.
    pub most_frequent_category: Option<String>,
}

pub fn player_stats(player: &Player) -> PlayerStats {
    let scores: Vec<u32> = player.score_history.iter().map(|r| r.score).collect();

    let mut best: Option<(u32, &str)> = None;
    for rec in &player.score_history {
        if best.map_or(true, |(s, _)| rec.score > s) {
            best = Some((rec.score, rec.category.as_str()));
        }
    }

    let mut freq: Vec<(&str, usize)> = Vec::new();
    for rec in &player.score_history {
        match freq.iter_mut().find(|e| e.0 == rec.category) {
            Some(entry) => entry.1 += 1,
            None => freq.push((rec.category.as_str(), 1)),
        }
    }
    let mut most_frequent: Option<(&str, usize)> = None;
    for &(cat, count) in &freq {
        if most_frequent.map_or(true, |(_, c)| count > c) {
            most_frequent = Some((cat, count));
        }
    }

    PlayerStats {
        name: player.name.clone(),
        total_score: player.score,
        rounds_played: player.score_history.len(),
        summary: summarize(&scores),
        best_score: best.map(|(s, _)| s),
        best_category: best.map(|(_, c)| c.to_string()),
        most_frequent_category: most_frequent.map(|(c, _)| c.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naasii_core::{Category, Player};

    #[test]
    fn summarize_known_values() {
        let s = summarize(&[50, 30, 40]).unwrap();
        assert!((s.mean - 40.0).abs() < 1e-9);
        assert!((s.median - 40.0).abs() < 1e-9);
        // Population std dev of {30,40,50} = sqrt(200/3).
        assert!((s.std_dev - (200.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(s.min, 30);
        assert_eq!(s.max, 50);
    }

    #[test]
    fn summarize_even_length_median() {
        let s = summarize(&[10, 20, 30, 40]).unwrap();
        assert!((s.median - 25.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn player_stats_tracks_best_and_most_frequent() {
        let mut p = Player::new("A");
        p.add_score(1, 60, Category::ThreeOfAKind);
        p.add_score(2, 90, Category::MultiplePairs);
        p.add_score(3, 90, Category::FourOfAKind);
        p.add_score(4, 60, Category::ThreeOfAKind);

        let stats = player_stats(&p);
        assert_eq!(stats.name, "A");
        assert_eq!(stats.total_score, 300);
        assert_eq!(stats.rounds_played, 4);
        // Earliest best-scoring round wins the tie.
        assert_eq!(stats.best_score, Some(90));
        assert_eq!(stats.best_category.as_deref(), Some("multiple_pairs"));
        assert_eq!(stats.most_frequent_category.as_deref(), Some("three_of_a_kind"));
    }

    #[test]
    fn player_stats_empty_history() {
        let p = Player::new("B");
        let stats = player_stats(&p);
        assert_eq!(stats.total_score, 0);
        assert_eq!(stats.rounds_played, 0);
        assert!(stats.summary.is_none());
        assert!(stats.best_score.is_none());
        assert!(stats.most_frequent_category.is_none());
    }
}
