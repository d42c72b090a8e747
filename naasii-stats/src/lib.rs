//! naasii-stats: score summaries, text charts, and the end-of-game report.

pub mod chart;
pub mod report;
pub mod summary;

pub use chart::{category_bars, histogram, progression_chart};
pub use report::render_report;
pub use summary::{player_stats, summarize, PlayerStats, ScoreSummary};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
