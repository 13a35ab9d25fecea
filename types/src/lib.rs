//! Kazik domain types.
//!
//! Game parameters, the persisted ledger snapshot and the engine configuration shared by the
//! execution layer and the simulator. Nothing in this crate touches randomness or the clock.

pub mod casino;
pub mod config;

pub use casino::{
    FarmingGame, GameParams, GameType, LedgerSnapshot, PlinkoRisk, PlinkoRows, RouletteTarget,
    Side, UserId,
};
pub use config::{ConfigError, CrashConfig, DungeonConfig, EngineConfig, MinesConfig};
