//! Game registry for the home screen.
//!
//! The registry provides:
//! - Centralized listing of supported games
//! - Active/inactive game filtering
//! - Metadata for UI display (names, descriptions, categories)
//!
//! # Example
//! ```rust
//! use kazik_execution::casino::registry::{GameCategory, GameRegistry};
//! use kazik_types::GameType;
//!
//! let registry = GameRegistry::default();
//! assert!(registry.is_active(GameType::Crash));
//! let info = GameRegistry::get_info(GameType::Crash);
//! assert_eq!(info.name, "To The Moon");
//! assert_eq!(info.category, GameCategory::Crash);
//! ```

use kazik_types::GameType;
use std::collections::HashMap;

/// Game categories for UI grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameCategory {
    /// Pure chance (Dungeon, Roulette, Mines).
    Luck,
    Crash,
    Plinko,
    /// Zero-stake reward loops.
    Farming,
}

/// Metadata about a game for UI display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub game_type: GameType,
    /// Route-style identifier.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: GameCategory,
    pub active: bool,
}

impl GameInfo {
    const fn new(
        game_type: GameType,
        id: &'static str,
        name: &'static str,
        description: &'static str,
        category: GameCategory,
    ) -> Self {
        Self {
            game_type,
            id,
            name,
            description,
            category,
            active: true,
        }
    }
}

/// Registry of available games.
#[derive(Clone, Debug)]
pub struct GameRegistry {
    active: HashMap<GameType, bool>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    /// Create a new registry with every game active.
    pub fn new() -> Self {
        let active = Self::all_game_types()
            .iter()
            .map(|game_type| (*game_type, true))
            .collect();
        Self { active }
    }

    /// Games in home-screen order.
    pub fn all_game_types() -> &'static [GameType] {
        &[
            GameType::Crash,
            GameType::Plinko,
            GameType::Dungeon,
            GameType::Roulette,
            GameType::Mines,
            GameType::Lumberjack,
            GameType::KeepieUppie,
        ]
    }

    /// Get static metadata for a game type.
    pub fn get_info(game_type: GameType) -> GameInfo {
        match game_type {
            GameType::Crash => GameInfo::new(
                GameType::Crash,
                "crash",
                "To The Moon",
                "Eject before crash",
                GameCategory::Crash,
            ),
            GameType::Plinko => GameInfo::new(
                GameType::Plinko,
                "plinko",
                "Plinko",
                "Drop the ball",
                GameCategory::Plinko,
            ),
            GameType::Dungeon => GameInfo::new(
                GameType::Dungeon,
                "dungeon",
                "Dungeon",
                "Save the princess",
                GameCategory::Luck,
            ),
            GameType::Roulette => GameInfo::new(
                GameType::Roulette,
                "roulette",
                "Roulette",
                "Classic Wheel",
                GameCategory::Luck,
            ),
            GameType::Mines => GameInfo::new(
                GameType::Mines,
                "mines",
                "Mines",
                "Watch your step",
                GameCategory::Luck,
            ),
            GameType::Lumberjack => GameInfo::new(
                GameType::Lumberjack,
                "lumberjack",
                "Lumberjack",
                "Chop wood for coins",
                GameCategory::Farming,
            ),
            GameType::KeepieUppie => GameInfo::new(
                GameType::KeepieUppie,
                "keepie-uppie",
                "Keepie Uppie",
                "Don't drop the ball",
                GameCategory::Farming,
            ),
        }
    }

    pub fn is_active(&self, game_type: GameType) -> bool {
        self.active.get(&game_type).copied().unwrap_or(false)
    }

    pub fn set_active(&mut self, game_type: GameType, active: bool) {
        self.active.insert(game_type, active);
    }

    /// Active games in home-screen order.
    pub fn active_games(&self) -> Vec<GameType> {
        Self::all_game_types()
            .iter()
            .copied()
            .filter(|game_type| self.is_active(*game_type))
            .collect()
    }

    /// Metadata for every game, with current active flags.
    pub fn all_games_info(&self) -> Vec<GameInfo> {
        Self::all_game_types()
            .iter()
            .map(|game_type| {
                let mut info = Self::get_info(*game_type);
                info.active = self.is_active(*game_type);
                info
            })
            .collect()
    }

    pub fn games_by_category(&self, category: GameCategory) -> Vec<GameType> {
        Self::all_game_types()
            .iter()
            .copied()
            .filter(|game_type| Self::get_info(*game_type).category == category)
            .collect()
    }

    /// Look a game up by its route-style identifier.
    pub fn find(id: &str) -> Option<GameInfo> {
        Self::all_game_types()
            .iter()
            .map(|game_type| Self::get_info(*game_type))
            .find(|info| info.id == id)
    }
}
