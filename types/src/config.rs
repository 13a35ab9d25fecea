//! Engine configuration.
//!
//! Every field has a default, so an empty document deserializes to the stock game rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::casino::{
    CRASH_COOLDOWN_MS, CRASH_GROWTH_RATE, CRASH_PAUSE_MS, DAILY_BONUS_AMOUNT,
    DAILY_BONUS_COOLDOWN_MS, DUNGEON_HOUSE_EDGE, DUNGEON_LEVELS, MINES_HOUSE_EDGE,
    RESCUE_BALANCE, STARTING_BALANCE,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("{field} must be in [0, 1) (got {value})")]
    InvalidHouseEdge { field: &'static str, value: f64 },
    #[error("{field} must be a positive finite number (got {value})")]
    InvalidRate { field: &'static str, value: f64 },
}

/// Crash round loop.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrashConfig {
    /// Exponent `k` of `e^(k·t)`, per second.
    pub growth_rate: f64,
    /// Betting window before a round flies.
    pub cooldown_ms: u64,
    /// Pause after a crash before the next betting window opens.
    pub crashed_pause_ms: u64,
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            growth_rate: CRASH_GROWTH_RATE,
            cooldown_ms: CRASH_COOLDOWN_MS,
            crashed_pause_ms: CRASH_PAUSE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MinesConfig {
    pub house_edge: f64,
}

impl Default for MinesConfig {
    fn default() -> Self {
        Self {
            house_edge: MINES_HOUSE_EDGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub house_edge: f64,
    pub levels: u8,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            house_edge: DUNGEON_HOUSE_EDGE,
            levels: DUNGEON_LEVELS,
        }
    }
}

/// Rules shared by every session of one engine instance.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,
    #[serde(default = "default_rescue_balance")]
    pub rescue_balance: u64,
    #[serde(default = "default_bonus_amount")]
    pub bonus_amount: u64,
    #[serde(default = "default_bonus_cooldown_ms")]
    pub bonus_cooldown_ms: u64,
    #[serde(default)]
    pub crash: CrashConfig,
    #[serde(default)]
    pub mines: MinesConfig,
    #[serde(default)]
    pub dungeon: DungeonConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            rescue_balance: default_rescue_balance(),
            bonus_amount: default_bonus_amount(),
            bonus_cooldown_ms: default_bonus_cooldown_ms(),
            crash: CrashConfig::default(),
            mines: MinesConfig::default(),
            dungeon: DungeonConfig::default(),
        }
    }
}

fn default_starting_balance() -> u64 {
    STARTING_BALANCE
}

fn default_rescue_balance() -> u64 {
    RESCUE_BALANCE
}

fn default_bonus_amount() -> u64 {
    DAILY_BONUS_AMOUNT
}

fn default_bonus_cooldown_ms() -> u64 {
    DAILY_BONUS_COOLDOWN_MS
}

fn ensure_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(())
}

fn ensure_house_edge(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::InvalidHouseEdge { field, value });
    }
    Ok(())
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_nonzero("starting_balance", self.starting_balance)?;
        ensure_nonzero("dungeon.levels", self.dungeon.levels as u64)?;
        ensure_house_edge("mines.house_edge", self.mines.house_edge)?;
        ensure_house_edge("dungeon.house_edge", self.dungeon.house_edge)?;
        if !(self.crash.growth_rate.is_finite() && self.crash.growth_rate > 0.0) {
            return Err(ConfigError::InvalidRate {
                field: "crash.growth_rate",
                value: self.crash.growth_rate,
            });
        }
        Ok(())
    }
}
