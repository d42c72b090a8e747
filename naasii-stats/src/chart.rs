//! Text charts rendered from score histories. Plain `#` bars only.

use naasii_core::Player;

const BAR_WIDTH: usize = 40;

/// Cumulative score per round, one bar block per player.
pub fn progression_chart(players: &[Player]) -> String {
    let max_total = players
        .iter()
        .flat_map(|p| p.score_history.iter())
        .map(|r| r.total)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("Score progression\n");
    for player in players {
        out.push_str(&format!("{}\n", player.name));
        if player.score_history.is_empty() {
            out.push_str("  (no rounds played)\n");
            continue;
        }
        for rec in &player.score_history {
            let filled = if max_total == 0 {
                0
            } else {
                (rec.total as usize * BAR_WIDTH) / max_total as usize
            };
            out.push_str(&format!(
                "  round {:>2} |{:<width$}| {}\n",
                rec.round,
                "#".repeat(filled),
                rec.total,
                width = BAR_WIDTH
            ));
        }
    }
    out
}

/// Binned distribution of per-turn scores.
pub fn histogram(scores: &[u32]) -> String {
    let mut out = String::new();
    out.push_str("Score distribution\n");
    if scores.is_empty() {
        out.push_str("  (no scores)\n");
        return out;
    }

    let min = scores.iter().copied().min().unwrap_or(0);
    let max = scores.iter().copied().max().unwrap_or(0);
    let span = max - min + 1;
    let bin_width = ((span + 9) / 10).max(1);
    let bins = ((span + bin_width - 1) / bin_width) as usize;

    let mut counts = vec![0usize; bins];
    for &s in scores {
        counts[((s - min) / bin_width) as usize] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1);

    for (i, &count) in counts.iter().enumerate() {
        let lo = min + i as u32 * bin_width;
        let hi = lo + bin_width - 1;
        let bar = count * BAR_WIDTH / peak;
        out.push_str(&format!(
            "  {:>4}-{:<4} |{:<width$}| {}\n",
            lo,
            hi,
            "#".repeat(bar),
            count,
            width = BAR_WIDTH
        ));
    }
    out
}

/// How often each category was scored, across all players, most common
/// first (ties keep first-seen order).
pub fn category_bars(players: &[Player]) -> String {
    let mut freq: Vec<(String, usize)> = Vec::new();
    for rec in players.iter().flat_map(|p| p.score_history.iter()) {
        match freq.iter_mut().find(|e| e.0 == rec.category) {
            Some(entry) => entry.1 += 1,
            None => freq.push((rec.category.clone(), 1)),
        }
    }

    let mut out = String::new();
    out.push_str("Category frequency\n");
    if freq.is_empty() {
        out.push_str("  (no rounds played)\n");
        return out;
    }

    freq.sort_by(|a, b| b.1.cmp(&a.1));
    let peak = freq.iter().map(|e| e.1).max().unwrap_or(1).max(1);
    for (cat, count) in &freq {
        let bar = count * BAR_WIDTH / peak;
        out.push_str(&format!(
            "  {:<22} |{:<width$}| {}\n",
            cat,
            "#".repeat(bar),
            count,
            width = BAR_WIDTH
        ));
    }
    out
}
