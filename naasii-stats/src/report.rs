//! Human-readable end-of-game statistics report.

use naasii_core::Player;

use crate::chart::{category_bars, histogram, progression_chart};
use crate::summary::player_stats;

/// Render the statistics report for a finished (or saved) game.
pub fn render_report(players: &[Player], include_charts: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    out.push_str(&rule);
    out.push('\n');
    out.push_str("NAASII GAME STATISTICS REPORT\n");
    out.push_str(&rule);
    out.push('\n');
    out.push('\n');

    out.push_str("PLAYER STATISTICS\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');

    for player in players {
        let stats = player_stats(player);
        out.push_str(&format!("\nPlayer: {}\n", stats.name));
        out.push_str(&format!("  Total score: {}\n", stats.total_score));
        out.push_str(&format!("  Rounds played: {}\n", stats.rounds_played));
        if let Some(summary) = &stats.summary {
            out.push_str(&format!(
                "  Scores: mean={:.1}, median={:.1}, std={:.1}, min={}, max={}\n",
                summary.mean, summary.median, summary.std_dev, summary.min, summary.max
            ));
        }
        if let (Some(best), Some(cat)) = (stats.best_score, &stats.best_category) {
            out.push_str(&format!("  Best round: {best} ({cat})\n"));
        }
        if let Some(cat) = &stats.most_frequent_category {
            out.push_str(&format!("  Most frequent category: {cat}\n"));
        }
    }

    if include_charts {
        let all_scores: Vec<u32> = players
            .iter()
            .flat_map(|p| p.score_history.iter())
            .map(|r| r.score)
            .collect();

        out.push('\n');
        out.push_str(&progression_chart(players));
        out.push('\n');
        out.push_str(&histogram(&all_scores));
        out.push('\n');
        out.push_str(&category_bars(players));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use naasii_core::{Category, Player};

    fn players() -> Vec<Player> {
        let mut a = Player::new("A");
        a.add_score(1, 60, Category::ThreeOfAKind);
        a.add_score(2, 90, Category::MultiplePairs);
        let mut b = Player::new("B");
        b.add_score(1, 30, Category::SinglePair);
        vec![a, b]
    }

    #[test]
    fn report_covers_every_player() {
        let report = render_report(&players(), false);
        assert!(report.contains("NAASII GAME STATISTICS REPORT"));
        assert!(report.contains("Player: A"));
        assert!(report.contains("Player: B"));
        assert!(report.contains("Total score: 150"));
        assert!(report.contains("Best round: 90 (multiple_pairs)"));
        assert!(!report.contains("Score progression"));
    }

    #[test]
    fn report_appends_charts_when_asked() {
        let report = render_report(&players(), true);
        assert!(report.contains("Score progression"));
        assert!(report.contains("Score distribution"));
        assert!(report.contains("Category frequency"));
    }
}
