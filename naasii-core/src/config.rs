//! Game configuration (YAML).
//!
//! Every field carries a serde default so partial files load cleanly;
//! `validate` enforces the bounds the rules assume before a session is
//! created from the config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pool::DICE_COUNT;

/// Hard cap on the configured round count.
pub const ROUNDS_CAP: u32 = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default = "default_min_players")]
    pub min_players: u32,
    #[serde(default = "default_max_players")]
    pub max_players: u32,
    /// Smallest round count a session may be configured with.
    #[serde(default = "default_min_rounds")]
    pub min_rounds: u32,
    /// Number of rounds a new session plays.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Informational; must match the fixed pool size.
    #[serde(default = "default_dice_count")]
    pub dice_count: u32,
    #[serde(default = "default_rolls_per_turn")]
    pub rolls_per_turn: u8,
    /// Write a save file after every completed round.
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    #[serde(default = "default_save_dir")]
    pub save_dir: String,
    /// Include text charts in the end-of-game report.
    #[serde(default = "default_charts")]
    pub charts: bool,
}

fn default_min_players() -> u32 {
    2
}

fn default_max_players() -> u32 {
    4
}

fn default_min_rounds() -> u32 {
    3
}

fn default_max_rounds() -> u32 {
    10
}

fn default_dice_count() -> u32 {
    DICE_COUNT as u32
}

fn default_rolls_per_turn() -> u8 {
    3
}

fn default_auto_save() -> bool {
    true
}

fn default_save_dir() -> String {
    "saves".to_string()
}

fn default_charts() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: default_min_players(),
            max_players: default_max_players(),
            min_rounds: default_min_rounds(),
            max_rounds: default_max_rounds(),
            dice_count: default_dice_count(),
            rolls_per_turn: default_rolls_per_turn(),
            auto_save: default_auto_save(),
            save_dir: default_save_dir(),
            charts: default_charts(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_players < 2 {
            return Err("min_players must be >= 2".to_string());
        }
        if self.max_players > 4 {
            return Err("max_players must be <= 4".to_string());
        }
        if self.min_players > self.max_players {
            return Err("min_players must be <= max_players".to_string());
        }
        if self.min_rounds < 1 {
            return Err("min_rounds must be >= 1".to_string());
        }
        if self.max_rounds < self.min_rounds {
            return Err(format!("max_rounds must be >= min_rounds ({})", self.min_rounds));
        }
        if self.max_rounds > ROUNDS_CAP {
            return Err(format!("max_rounds must be <= {ROUNDS_CAP}"));
        }
        if self.dice_count as usize != DICE_COUNT {
            return Err(format!("dice_count must be {DICE_COUNT}"));
        }
        if self.rolls_per_turn < 1 || self.rolls_per_turn > 10 {
            return Err("rolls_per_turn must be in 1..=10".to_string());
        }
        if self.save_dir.trim().is_empty() {
            return Err("save_dir must be non-empty".to_string());
        }
        Ok(())
    }
}
