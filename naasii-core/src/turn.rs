//! Turn state machine: up to the budgeted number of rolls, then exactly
//! one scoring.
//!
//! This module is the single place that sequences pool mutations for a
//! turn. The caller decides when to stop rolling and which dice to keep;
//! once the budget is spent the only legal transition is scoring.

use rand::Rng;
use thiserror::Error;

use crate::pool::{DicePool, PoolError, DICE_COUNT};
use crate::scoring::{calculate_score, ScoreError, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingFirstRoll,
    Rolled,
    Scored,
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("no roll has been made this turn")]
    NotRolled,
    #[error("turn has already been scored")]
    AlreadyScored,
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Drives one pool through a turn. Reused across turns via `begin_turn`.
#[derive(Debug)]
pub struct TurnController {
    pool: DicePool,
    phase: TurnPhase,
}

impl TurnController {
    pub fn new(mut pool: DicePool) -> Self {
        pool.reset_turn();
        Self {
            pool,
            phase: TurnPhase::AwaitingFirstRoll,
        }
    }

    /// Start a fresh turn: all dice unlocked, full roll budget.
    pub fn begin_turn(&mut self) {
        self.pool.reset_turn();
        self.phase = TurnPhase::AwaitingFirstRoll;
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// True while another roll is both legal and budgeted.
    pub fn can_roll(&self) -> bool {
        self.phase != TurnPhase::Scored && self.pool.rolls_remaining() > 0
    }

    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> Result<[u8; DICE_COUNT], TurnError> {
        if self.phase == TurnPhase::Scored {
            return Err(TurnError::AlreadyScored);
        }
        let values = self.pool.roll_all(rng)?;
        self.phase = TurnPhase::Rolled;
        Ok(values)
    }

    pub fn lock(&mut self, indices: &[usize]) -> Result<(), TurnError> {
        self.require_rolled()?;
        self.pool.lock(indices);
        Ok(())
    }

    pub fn lock_all(&mut self) -> Result<(), TurnError> {
        self.require_rolled()?;
        self.pool.lock_all();
        Ok(())
    }

    pub fn unlock_all(&mut self) -> Result<(), TurnError> {
        self.require_rolled()?;
        self.pool.unlock_all();
        Ok(())
    }

    /// Score the current values, ending the turn. Yields exactly one
    /// result per turn; further calls fail with `AlreadyScored`.
    pub fn score(&mut self) -> Result<ScoreResult, TurnError> {
        match self.phase {
            TurnPhase::AwaitingFirstRoll => Err(TurnError::NotRolled),
            TurnPhase::Scored => Err(TurnError::AlreadyScored),
            TurnPhase::Rolled => {
                let result = calculate_score(&self.pool.current_values())?;
                self.phase = TurnPhase::Scored;
                Ok(result)
            }
        }
    }

    fn require_rolled(&self) -> Result<(), TurnError> {
        match self.phase {
            TurnPhase::AwaitingFirstRoll => Err(TurnError::NotRolled),
            TurnPhase::Scored => Err(TurnError::AlreadyScored),
            TurnPhase::Rolled => Ok(()),
        }
    }
}
