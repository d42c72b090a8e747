//! naasii-core: Game rules, dice state, scoring, and configuration.

pub mod config;
pub mod ledger;
pub mod pool;
pub mod scoring;
pub mod session;
pub mod turn;

pub use config::{ConfigError, GameConfig, ROUNDS_CAP};
pub use ledger::{Player, ScoreRecord};
pub use pool::{DicePool, Die, PoolError, DEFAULT_ROLLS_PER_TURN, DICE_COUNT};
pub use scoring::{
    analyze_dice, calculate_score, Category, DiceAnalysis, ScoreError, ScoreResult, FACES,
};
pub use session::{GameSession, SessionError};
pub use turn::{TurnController, TurnError, TurnPhase};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
