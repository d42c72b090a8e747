//! Multi-round game session: players, round progression, standings.
//!
//! The session owns the player ledgers and the round counter. It does no
//! I/O; the driving loop rolls dice through a `TurnController` and feeds
//! results back via `record_score`.

use thiserror::Error;

use crate::config::{GameConfig, ROUNDS_CAP};
use crate::ledger::Player;
use crate::scoring::ScoreResult;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("player count must be between {min} and {max}, got {got}")]
    PlayerCount { got: usize, min: u32, max: u32 },
    #[error("player name {0:?} is empty or duplicated")]
    BadPlayerName(String),
    #[error("round count must be between {min} and {max}, got {got}")]
    RoundCount { got: u32, min: u32, max: u32 },
    #[error("no player at index {0}")]
    NoSuchPlayer(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub players: Vec<Player>,
    /// 1-based round about to be played (or just played, before advancing).
    pub current_round: u32,
    pub max_rounds: u32,
}

impl GameSession {
    /// Create a fresh session from player names and the configured bounds.
    pub fn new(names: &[String], cfg: &GameConfig) -> Result<Self, SessionError> {
        let count = names.len();
        if (count as u32) < cfg.min_players || (count as u32) > cfg.max_players {
            return Err(SessionError::PlayerCount {
                got: count,
                min: cfg.min_players,
                max: cfg.max_players,
            });
        }
        for (i, name) in names.iter().enumerate() {
            let trimmed = name.trim();
            if trimmed.is_empty() || names[..i].iter().any(|n| n.trim() == trimmed) {
                return Err(SessionError::BadPlayerName(name.clone()));
            }
        }
        if cfg.max_rounds < cfg.min_rounds || cfg.max_rounds > ROUNDS_CAP {
            return Err(SessionError::RoundCount {
                got: cfg.max_rounds,
                min: cfg.min_rounds,
                max: ROUNDS_CAP,
            });
        }

        Ok(Self {
            players: names.iter().map(|n| Player::new(n.trim())).collect(),
            current_round: 1,
            max_rounds: cfg.max_rounds,
        })
    }

    /// Rebuild a session from previously persisted state. No validation:
    /// the save layer owns format concerns.
    pub fn from_parts(players: Vec<Player>, current_round: u32, max_rounds: u32) -> Self {
        Self {
            players,
            current_round,
            max_rounds,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_round > self.max_rounds
    }

    pub fn advance_round(&mut self) {
        self.current_round += 1;
    }

    /// Credit a turn result to the player at `idx` for the current round.
    pub fn record_score(&mut self, idx: usize, result: &ScoreResult) -> Result<(), SessionError> {
        let round = self.current_round;
        let player = self
            .players
            .get_mut(idx)
            .ok_or(SessionError::NoSuchPlayer(idx))?;
        player.add_score(round, result.score, result.category);
        Ok(())
    }

    /// Players ordered by descending total; ties keep seating order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut order: Vec<&Player> = self.players.iter().collect();
        order.sort_by(|a, b| b.score.cmp(&a.score));
        order
    }

    pub fn leader(&self) -> Option<&Player> {
        self.standings().into_iter().next()
    }
}
