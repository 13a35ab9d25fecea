//! Mines.
//!
//! A 5x5 grid with `m` mines placed up-front by index draws without replacement. Each safe reveal
//! `i` (0-indexed) multiplies the payout by `(1 - edge) / ((25 - m - i) / (25 - i))`. Revealing
//! every safe cell wins automatically.

use kazik_types::casino::MINES_GRID_SIZE;

use super::{settle_amount, CasinoGame, GameResult, InvalidCommand, PlayerInput};
use crate::rng::DrawSource;

const GRID: usize = MINES_GRID_SIZE as usize;

/// Multiplier for the `i`-th safe reveal (0-indexed).
pub fn step_multiplier(mines: u8, index: u8, house_edge: f64) -> f64 {
    let remaining = (MINES_GRID_SIZE - index) as f64;
    let safe = (MINES_GRID_SIZE - mines - index) as f64;
    (1.0 - house_edge) * remaining / safe
}

/// Product of the first `revealed` step multipliers.
pub fn cumulative_multiplier(mines: u8, revealed: u8, house_edge: f64) -> f64 {
    (0..revealed).fold(1.0, |acc, i| acc * step_multiplier(mines, i, house_edge))
}

/// Pick `mines` distinct cells.
pub fn place_mines<D: DrawSource + ?Sized>(mines: u8, draws: &mut D) -> [bool; GRID] {
    let mut grid = [false; GRID];
    let mut free: Vec<u8> = (0..MINES_GRID_SIZE).collect();
    for _ in 0..mines.min(MINES_GRID_SIZE) {
        let index = draws.next_index(free.len());
        let cell = free.swap_remove(index);
        grid[cell as usize] = true;
    }
    grid
}

#[derive(Clone, Debug)]
pub struct MinesGame {
    mines: u8,
    house_edge: f64,
    grid: [bool; GRID],
    revealed: Vec<u8>,
}

impl MinesGame {
    pub fn new<D: DrawSource + ?Sized>(mines: u8, house_edge: f64, draws: &mut D) -> Self {
        Self {
            mines,
            house_edge,
            grid: place_mines(mines, draws),
            revealed: Vec::new(),
        }
    }

    pub fn mines_count(&self) -> u8 {
        self.mines
    }

    pub fn revealed(&self) -> &[u8] {
        &self.revealed
    }

    pub fn revealed_count(&self) -> u8 {
        self.revealed.len() as u8
    }

    pub fn safe_cells(&self) -> u8 {
        MINES_GRID_SIZE - self.mines
    }

    pub fn mine_cells(&self) -> Vec<u8> {
        (0..MINES_GRID_SIZE)
            .filter(|cell| self.grid[*cell as usize])
            .collect()
    }

    fn reveal(&mut self, stake: u64, cell: u8) -> Result<GameResult, InvalidCommand> {
        if cell >= MINES_GRID_SIZE {
            return Err(InvalidCommand::CellOutOfRange);
        }
        if self.revealed.contains(&cell) {
            return Err(InvalidCommand::CellAlreadyRevealed);
        }
        if self.grid[cell as usize] {
            return Ok(GameResult::Loss);
        }
        self.revealed.push(cell);
        if self.revealed_count() == self.safe_cells() {
            return Ok(GameResult::Win(settle_amount(stake, self.multiplier())));
        }
        Ok(GameResult::Continue)
    }
}

impl CasinoGame for MinesGame {
    fn process_move(
        &mut self,
        stake: u64,
        input: PlayerInput,
    ) -> Result<GameResult, InvalidCommand> {
        match input {
            PlayerInput::Reveal { cell } => self.reveal(stake, cell),
            PlayerInput::CashOut => {
                if self.revealed.is_empty() {
                    return Err(InvalidCommand::NothingToCashOut);
                }
                Ok(GameResult::CashOut(settle_amount(stake, self.multiplier())))
            }
            PlayerInput::OpenDoor { .. } => Err(InvalidCommand::UnsupportedInput),
        }
    }

    fn multiplier(&self) -> f64 {
        cumulative_multiplier(self.mines, self.revealed_count(), self.house_edge)
    }
}
