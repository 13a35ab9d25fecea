//! Dungeon.
//!
//! `levels` sequential door choices among `difficulty` doors. The winning door of every level is
//! drawn when the session starts. Each cleared level multiplies the payout by
//! `difficulty × (1 - edge)`.

use super::{settle_amount, CasinoGame, GameResult, InvalidCommand, PlayerInput};
use crate::rng::DrawSource;

/// Multiplier for surviving one level with `difficulty` doors.
pub fn step_multiplier(difficulty: u8, house_edge: f64) -> f64 {
    // Survival probability is 1/difficulty.
    difficulty as f64 * (1.0 - house_edge)
}

pub fn cumulative_multiplier(difficulty: u8, cleared: u8, house_edge: f64) -> f64 {
    step_multiplier(difficulty, house_edge).powi(cleared as i32)
}

/// Winning door index for each level.
pub fn winning_path<D: DrawSource + ?Sized>(levels: u8, difficulty: u8, draws: &mut D) -> Vec<u8> {
    (0..levels)
        .map(|_| draws.next_index(difficulty as usize) as u8)
        .collect()
}

#[derive(Clone, Debug)]
pub struct DungeonGame {
    difficulty: u8,
    house_edge: f64,
    path: Vec<u8>,
    level: u8,
}

impl DungeonGame {
    pub fn new<D: DrawSource + ?Sized>(
        difficulty: u8,
        levels: u8,
        house_edge: f64,
        draws: &mut D,
    ) -> Self {
        Self {
            difficulty,
            house_edge,
            path: winning_path(levels, difficulty, draws),
            level: 0,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn levels(&self) -> u8 {
        self.path.len() as u8
    }

    /// Levels cleared so far.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    fn open_door(&mut self, stake: u64, door: u8) -> Result<GameResult, InvalidCommand> {
        if door >= self.difficulty {
            return Err(InvalidCommand::DoorOutOfRange);
        }
        if self.path[self.level as usize] != door {
            return Ok(GameResult::Loss);
        }
        self.level += 1;
        if self.level == self.levels() {
            return Ok(GameResult::Win(settle_amount(stake, self.multiplier())));
        }
        Ok(GameResult::Continue)
    }
}

impl CasinoGame for DungeonGame {
    fn process_move(
        &mut self,
        stake: u64,
        input: PlayerInput,
    ) -> Result<GameResult, InvalidCommand> {
        match input {
            PlayerInput::OpenDoor { door } => self.open_door(stake, door),
            PlayerInput::CashOut => {
                if self.level == 0 {
                    return Err(InvalidCommand::NothingToCashOut);
                }
                Ok(GameResult::CashOut(settle_amount(stake, self.multiplier())))
            }
            PlayerInput::Reveal { .. } => Err(InvalidCommand::UnsupportedInput),
        }
    }

    fn multiplier(&self) -> f64 {
        cumulative_multiplier(self.difficulty, self.level, self.house_edge)
    }
}
