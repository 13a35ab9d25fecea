use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{DUNGEON_DIFFICULTIES, MINES_GRID_SIZE, ROULETTE_MAX_NUMBER};

/// Games offered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Crash,
    Mines,
    Dungeon,
    Plinko,
    Roulette,
    KeepieUppie,
    Lumberjack,
}

impl GameType {
    pub fn is_wagering(&self) -> bool {
        !matches!(self, GameType::KeepieUppie | GameType::Lumberjack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Crash => "crash",
            GameType::Mines => "mines",
            GameType::Dungeon => "dungeon",
            GameType::Plinko => "plinko",
            GameType::Roulette => "roulette",
            GameType::KeepieUppie => "keepie_uppie",
            GameType::Lumberjack => "lumberjack",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a textual game parameter cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseParamError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseParamError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// What a roulette bet is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouletteTarget {
    /// A single pocket, 0-36.
    Number(u8),
    Red,
    Black,
    /// The zero pocket, bet by colour.
    Green,
}

impl FromStr for RouletteTarget {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(RouletteTarget::Red),
            "black" => Ok(RouletteTarget::Black),
            "green" | "zero" => Ok(RouletteTarget::Green),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= ROULETTE_MAX_NUMBER)
                .map(RouletteTarget::Number)
                .ok_or_else(|| ParseParamError::new("roulette target", s)),
        }
    }
}

/// Plinko risk tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlinkoRisk {
    Low,
    Medium,
    High,
}

impl FromStr for PlinkoRisk {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PlinkoRisk::Low),
            "medium" => Ok(PlinkoRisk::Medium),
            "high" => Ok(PlinkoRisk::High),
            _ => Err(ParseParamError::new("plinko risk", s)),
        }
    }
}

/// Plinko board size (rows of pegs).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PlinkoRows {
    Eight = 8,
    Twelve = 12,
    Sixteen = 16,
}

impl PlinkoRows {
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for PlinkoRows {
    type Error = ParseParamError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(PlinkoRows::Eight),
            12 => Ok(PlinkoRows::Twelve),
            16 => Ok(PlinkoRows::Sixteen),
            other => Err(ParseParamError::new("plinko rows", &other.to_string())),
        }
    }
}

impl From<PlinkoRows> for u8 {
    fn from(rows: PlinkoRows) -> Self {
        rows as u8
    }
}

impl FromStr for PlinkoRows {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ParseParamError::new("plinko rows", s))
            .and_then(PlinkoRows::try_from)
    }
}

/// Left or right, for plinko bounces and lumberjack chops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Zero-stake farming games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarmingGame {
    KeepieUppie,
    Lumberjack,
}

impl From<FarmingGame> for GameType {
    fn from(game: FarmingGame) -> Self {
        match game {
            FarmingGame::KeepieUppie => GameType::KeepieUppie,
            FarmingGame::Lumberjack => GameType::Lumberjack,
        }
    }
}

/// Per-round configuration chosen before a wagering session starts.
///
/// Immutable once the session is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameParams {
    Crash,
    Mines { mines: u8 },
    Dungeon { difficulty: u8 },
    Plinko { rows: PlinkoRows, risk: PlinkoRisk },
    Roulette { target: RouletteTarget },
}

impl GameParams {
    pub fn game_type(&self) -> GameType {
        match self {
            GameParams::Crash => GameType::Crash,
            GameParams::Mines { .. } => GameType::Mines,
            GameParams::Dungeon { .. } => GameType::Dungeon,
            GameParams::Plinko { .. } => GameType::Plinko,
            GameParams::Roulette { .. } => GameType::Roulette,
        }
    }

    /// Check the parameters against the game's rules.
    pub fn validate(&self) -> Result<(), &'static str> {
        match *self {
            GameParams::Mines { mines } => {
                if mines == 0 || mines >= MINES_GRID_SIZE {
                    return Err("mine count must leave at least one mine and one safe cell");
                }
            }
            GameParams::Dungeon { difficulty } => {
                if !DUNGEON_DIFFICULTIES.contains(&difficulty) {
                    return Err("dungeon difficulty must be 2, 3 or 4 doors");
                }
            }
            GameParams::Roulette {
                target: RouletteTarget::Number(n),
            } => {
                if n > ROULETTE_MAX_NUMBER {
                    return Err("roulette number must be 0-36");
                }
            }
            _ => {}
        }
        Ok(())
    }
}
