//! Twelve-die pool state for the turn in progress.
//!
//! The pool is the single place die values and locks are mutated. It is
//! exclusively owned by the turn being played; randomness is injected by the
//! caller so games can be replayed from a seed.

use rand::Rng;
use thiserror::Error;

/// Number of dice in a pool.
pub const DICE_COUNT: usize = 12;

/// Roll budget granted by `reset_turn` unless configured otherwise.
pub const DEFAULT_ROLLS_PER_TURN: u8 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("no rolls remaining this turn")]
    NoRollsRemaining,
}

/// One die slot. `value` only changes when the die is unlocked and rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    pub value: u8,
    pub locked: bool,
}

impl Die {
    fn new() -> Self {
        Self {
            value: 1,
            locked: false,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.locked {
            write!(f, "[{}]", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Ordered pool of exactly twelve dice plus the roll budget for the turn.
///
/// Positions 0..=11 are significant: lock commands reference dice by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicePool {
    dice: [Die; DICE_COUNT],
    rolls_per_turn: u8,
    rolls_remaining: u8,
    rolls_taken: u8,
}

impl Default for DicePool {
    fn default() -> Self {
        Self::new()
    }
}

impl DicePool {
    pub fn new() -> Self {
        Self::with_rolls_per_turn(DEFAULT_ROLLS_PER_TURN)
    }

    pub fn with_rolls_per_turn(rolls_per_turn: u8) -> Self {
        Self {
            dice: [Die::new(); DICE_COUNT],
            rolls_per_turn,
            rolls_remaining: rolls_per_turn,
            rolls_taken: 0,
        }
    }

    /// Unlock every die and restore the full roll budget.
    pub fn reset_turn(&mut self) {
        self.unlock_all();
        self.rolls_remaining = self.rolls_per_turn;
        self.rolls_taken = 0;
    }

    /// Re-roll every unlocked die, spending one roll from the budget.
    ///
    /// Fails without mutating anything when the budget is exhausted. On
    /// success returns all twelve current values, locked dice included.
    pub fn roll_all<R: Rng>(&mut self, rng: &mut R) -> Result<[u8; DICE_COUNT], PoolError> {
        if self.rolls_remaining == 0 {
            return Err(PoolError::NoRollsRemaining);
        }
        self.rolls_remaining -= 1;
        self.rolls_taken += 1;
        for die in &mut self.dice {
            if !die.locked {
                die.value = rng.gen_range(1..=6);
            }
        }
        Ok(self.current_values())
    }

    /// Lock the dice at the given positions. Out-of-range positions are
    /// silently ignored; locking an already-locked die is a no-op.
    pub fn lock(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(die) = self.dice.get_mut(i) {
                die.locked = true;
            }
        }
    }

    pub fn lock_all(&mut self) {
        for die in &mut self.dice {
            die.locked = true;
        }
    }

    pub fn unlock_all(&mut self) {
        for die in &mut self.dice {
            die.locked = false;
        }
    }

    /// Current values of all twelve dice, in position order.
    pub fn current_values(&self) -> [u8; DICE_COUNT] {
        let mut out = [0u8; DICE_COUNT];
        for (slot, die) in out.iter_mut().zip(self.dice.iter()) {
            *slot = die.value;
        }
        out
    }

    /// Positions currently locked, ascending.
    pub fn locked_indices(&self) -> Vec<usize> {
        self.dice
            .iter()
            .enumerate()
            .filter(|(_, die)| die.locked)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    pub fn rolls_taken(&self) -> u8 {
        self.rolls_taken
    }

    pub fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }
}
