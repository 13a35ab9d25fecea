//! Casino game execution module.
//!
//! This module contains the outcome generators and session state machines for:
//! - Crash
//! - Mines
//! - Dungeon
//! - Plinko
//! - Roulette
//!
//! and the zero-stake farming loops (Keepie-uppie, Lumberjack).
//!
//! Sessions never touch the ledger. They resolve to a [`GameResult`] and the layer applies the
//! debit at start and the single credit at settlement.

pub mod crash;
pub mod dungeon;
pub mod keepie_uppie;
pub mod lumberjack;
pub mod mines;
pub mod plinko;
pub mod registry;
pub mod roulette;

#[cfg(test)]
mod integration_tests;

use kazik_types::{EngineConfig, FarmingGame, GameParams, GameType, Side};
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::rng::DrawSource;

pub use crash::{CrashBet, CrashEvent, CrashPhase, CrashRound, CrashView};
pub use dungeon::DungeonGame;
pub use keepie_uppie::KeepieUppie;
pub use lumberjack::Lumberjack;
pub use mines::MinesGame;
pub use plinko::PlinkoDrop;
pub use roulette::{PocketColor, RouletteSpin};

/// Added before flooring a float payout so that products which are integral in exact arithmetic
/// (e.g. `100 × 1.00`) are not truncated one unit low.
pub(crate) const SETTLEMENT_EPSILON: f64 = 1e-9;

/// `floor(stake × multiplier)`.
pub fn settle_amount(stake: u64, multiplier: f64) -> u64 {
    let value = (stake as f64 * multiplier + SETTLEMENT_EPSILON).floor();
    if value <= 0.0 {
        0
    } else {
        // Saturating float-to-int cast.
        value as u64
    }
}

/// Multiplier floored to two decimals for display.
pub fn display_multiplier(multiplier: f64) -> f64 {
    (multiplier * 100.0 + SETTLEMENT_EPSILON).floor() / 100.0
}

pub type SessionId = u64;

/// Commands that are not valid in the session's current state. Rejected without state change.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCommand {
    #[error("session is not active")]
    NotActive,
    #[error("session already settled")]
    AlreadySettled,
    #[error("session has not resolved yet")]
    NotResolved,
    #[error("nothing to cash out")]
    NothingToCashOut,
    #[error("cell already revealed")]
    CellAlreadyRevealed,
    #[error("cell out of range")]
    CellOutOfRange,
    #[error("door out of range")]
    DoorOutOfRange,
    #[error("betting is closed for this round")]
    BettingClosed,
    #[error("already cashed out")]
    AlreadyCashedOut,
    #[error("input does not apply to this game")]
    UnsupportedInput,
}

/// Error during game execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("insufficient funds (balance={balance}, requested={requested})")]
    InsufficientFunds { balance: u64, requested: u64 },
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] InvalidCommand),
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
    #[error("session {0} is still in progress")]
    SessionInProgress(SessionId),
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
    #[error("a farming session is already running")]
    FarmingInProgress,
    #[error("wait {remaining_minutes} mins")]
    CooldownActive { remaining_minutes: u64 },
    #[error("storage: {0}")]
    Storage(String),
}

impl From<LedgerError> for GameError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { balance, requested } => {
                GameError::InsufficientFunds { balance, requested }
            }
            LedgerError::CooldownActive { remaining_minutes } => {
                GameError::CooldownActive { remaining_minutes }
            }
            LedgerError::Storage(message) => GameError::Storage(message),
        }
    }
}

/// Player commands for an active wagering session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    /// Mines: uncover a cell (0-24, row-major on the 5x5 grid).
    Reveal { cell: u8 },
    /// Dungeon: pick a door on the current level.
    OpenDoor { door: u8 },
    /// Crash, Mines, Dungeon: take the current payout.
    CashOut,
}

/// Result of processing a game move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Game is still in progress.
    Continue,
    /// Game completed with a win. Value is TOTAL RETURN (stake + profit).
    Win(u64),
    /// Player took the running payout. Value is TOTAL RETURN.
    CashOut(u64),
    /// Game completed with a loss.
    Loss,
}

/// Lifecycle of a wagering session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Won,
    Lost,
    CashedOut,
}

impl SessionStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Won => "won",
            SessionStatus::Lost => "lost",
            SessionStatus::CashedOut => "cashed_out",
        }
    }
}

/// Trait for multi-step wagering games.
pub trait CasinoGame {
    /// Apply a player input to the active game. `stake` scales any payout.
    fn process_move(&mut self, stake: u64, input: PlayerInput)
        -> Result<GameResult, InvalidCommand>;

    /// Cumulative multiplier earned so far.
    fn multiplier(&self) -> f64;
}

/// Per-game state held by a session.
#[derive(Clone, Debug)]
pub enum GameState {
    Crash(CrashBet),
    Mines(MinesGame),
    Dungeon(DungeonGame),
    Plinko(PlinkoDrop),
    Roulette(RouletteSpin),
}

impl GameState {
    /// Draw the outcome for `params` and return the initial state.
    ///
    /// Single-shot games resolve immediately. Crash bets join `crash_round`.
    pub fn start<D: DrawSource + ?Sized>(
        params: GameParams,
        stake: u64,
        config: &EngineConfig,
        crash_round: u64,
        draws: &mut D,
    ) -> (Self, GameResult) {
        match params {
            GameParams::Crash => (
                GameState::Crash(CrashBet::new(crash_round)),
                GameResult::Continue,
            ),
            GameParams::Mines { mines } => (
                GameState::Mines(MinesGame::new(mines, config.mines.house_edge, draws)),
                GameResult::Continue,
            ),
            GameParams::Dungeon { difficulty } => (
                GameState::Dungeon(DungeonGame::new(
                    difficulty,
                    config.dungeon.levels,
                    config.dungeon.house_edge,
                    draws,
                )),
                GameResult::Continue,
            ),
            GameParams::Plinko { rows, risk } => {
                let (drop, result) = PlinkoDrop::drop(rows, risk, stake, draws);
                (GameState::Plinko(drop), result)
            }
            GameParams::Roulette { target } => {
                let (spin, result) = RouletteSpin::spin(target, stake, draws);
                (GameState::Roulette(spin), result)
            }
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            GameState::Crash(bet) => bet.multiplier(),
            GameState::Mines(game) => game.multiplier(),
            GameState::Dungeon(game) => game.multiplier(),
            GameState::Plinko(drop) => drop.multiplier(),
            GameState::Roulette(spin) => spin.multiplier(),
        }
    }
}

/// One wager round from bet placement to settlement.
#[derive(Clone, Debug)]
pub struct WagerSession {
    pub id: SessionId,
    pub params: GameParams,
    pub stake: u64,
    pub state: GameState,
    pub status: SessionStatus,
    /// Resolved payout (TOTAL RETURN). Zero until resolved and for losses.
    pub payout: u64,
    pub settled: bool,
    pub move_count: u32,
}

impl WagerSession {
    pub fn new(id: SessionId, params: GameParams, stake: u64, state: GameState) -> Self {
        Self {
            id,
            params,
            stake,
            state,
            status: SessionStatus::Active,
            payout: 0,
            settled: false,
            move_count: 0,
        }
    }

    pub fn game_type(&self) -> GameType {
        self.params.game_type()
    }

    /// Record a game result. The outcome is assigned at most once.
    pub fn apply(&mut self, result: GameResult) {
        if self.status.is_resolved() {
            return;
        }
        let (status, payout) = match result {
            GameResult::Continue => return,
            GameResult::Win(payout) => (SessionStatus::Won, payout),
            GameResult::CashOut(payout) => (SessionStatus::CashedOut, payout),
            GameResult::Loss => (SessionStatus::Lost, 0),
        };
        self.status = status;
        self.payout = payout;
    }

    /// Apply an input through the game's state machine.
    pub fn process_move(&mut self, input: PlayerInput) -> Result<GameResult, InvalidCommand> {
        if self.settled {
            return Err(InvalidCommand::AlreadySettled);
        }
        if self.status.is_resolved() {
            return Err(InvalidCommand::NotActive);
        }
        let result = match &mut self.state {
            GameState::Mines(game) => game.process_move(self.stake, input)?,
            GameState::Dungeon(game) => game.process_move(self.stake, input)?,
            GameState::Plinko(drop) => drop.process_move(self.stake, input)?,
            GameState::Roulette(spin) => spin.process_move(self.stake, input)?,
            // Crash cash-outs need the shared round; the layer routes them.
            GameState::Crash(_) => return Err(InvalidCommand::UnsupportedInput),
        };
        self.move_count += 1;
        self.apply(result);
        Ok(result)
    }

    /// Cash a crash bet out at the running multiplier of `round`.
    pub fn cash_out_crash(&mut self, round: &CrashRound) -> Result<GameResult, InvalidCommand> {
        if self.settled {
            return Err(InvalidCommand::AlreadySettled);
        }
        if self.status.is_resolved() {
            return Err(InvalidCommand::NotActive);
        }
        let GameState::Crash(bet) = &mut self.state else {
            return Err(InvalidCommand::UnsupportedInput);
        };
        let result = bet.cash_out(self.stake, round)?;
        self.move_count += 1;
        self.apply(result);
        Ok(result)
    }

    /// Payout if the session were cashed out now, or the resolved payout.
    pub fn current_payout(&self) -> u64 {
        match self.status {
            SessionStatus::Active => match &self.state {
                GameState::Mines(game) if game.revealed_count() > 0 => {
                    settle_amount(self.stake, game.multiplier())
                }
                GameState::Dungeon(game) if game.level() > 0 => {
                    settle_amount(self.stake, game.multiplier())
                }
                _ => 0,
            },
            _ => self.payout,
        }
    }

    pub fn view(&self) -> SessionView {
        let resolved = self.status.is_resolved();
        let detail = match &self.state {
            GameState::Crash(bet) => SessionDetail::Crash {
                round: bet.round(),
                cashed_out_at: bet.cashed_out_at(),
            },
            GameState::Mines(game) => SessionDetail::Mines {
                mines: game.mines_count(),
                revealed: game.revealed().to_vec(),
                mine_cells: resolved.then(|| game.mine_cells()),
            },
            GameState::Dungeon(game) => SessionDetail::Dungeon {
                difficulty: game.difficulty(),
                levels: game.levels(),
                level: game.level(),
                path: resolved.then(|| game.path().to_vec()),
            },
            GameState::Plinko(drop) => SessionDetail::Plinko {
                path: drop.path().to_vec(),
                bucket: drop.bucket(),
                multiplier_bps: drop.multiplier_bps(),
            },
            GameState::Roulette(spin) => SessionDetail::Roulette {
                pocket: spin.pocket(),
                number: spin.number(),
                color: spin.color(),
            },
        };
        SessionView {
            id: self.id,
            game: self.game_type(),
            stake: self.stake,
            status: self.status,
            settled: self.settled,
            multiplier: display_multiplier(self.state.multiplier()),
            payout: self.current_payout(),
            detail,
        }
    }
}

/// Presentation snapshot of a wagering session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub id: SessionId,
    pub game: GameType,
    pub stake: u64,
    pub status: SessionStatus,
    pub settled: bool,
    /// Cumulative multiplier, floored to two decimals.
    pub multiplier: f64,
    /// Resolved payout, or the cash-out value while active.
    pub payout: u64,
    pub detail: SessionDetail,
}

/// Game-specific part of a [`SessionView`]. Hidden outcomes are only exposed once resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionDetail {
    Crash {
        round: u64,
        /// Multiplier in hundredths at which the bet was cashed out.
        cashed_out_at: Option<u64>,
    },
    Mines {
        mines: u8,
        revealed: Vec<u8>,
        mine_cells: Option<Vec<u8>>,
    },
    Dungeon {
        difficulty: u8,
        levels: u8,
        level: u8,
        path: Option<Vec<u8>>,
    },
    Plinko {
        path: Vec<Side>,
        bucket: usize,
        multiplier_bps: u64,
    },
    Roulette {
        pocket: usize,
        number: u8,
        color: PocketColor,
    },
}

/// Farming input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FarmingInput {
    /// Keepie-uppie: hit the ball.
    Tap,
    /// Lumberjack: chop from one side of the trunk.
    Chop(Side),
    /// End the session and bank the earnings.
    Quit,
}

/// A zero-stake farming session.
#[derive(Clone, Debug)]
pub enum FarmingState {
    KeepieUppie(KeepieUppie),
    Lumberjack(Lumberjack),
}

impl FarmingState {
    pub fn new(game: FarmingGame) -> Self {
        match game {
            FarmingGame::KeepieUppie => FarmingState::KeepieUppie(KeepieUppie::new()),
            FarmingGame::Lumberjack => FarmingState::Lumberjack(Lumberjack::new()),
        }
    }

    pub fn game(&self) -> FarmingGame {
        match self {
            FarmingState::KeepieUppie(_) => FarmingGame::KeepieUppie,
            FarmingState::Lumberjack(_) => FarmingGame::Lumberjack,
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            FarmingState::KeepieUppie(game) => game.is_over(),
            FarmingState::Lumberjack(game) => game.is_over(),
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            FarmingState::KeepieUppie(game) => game.total(),
            FarmingState::Lumberjack(game) => game.score(),
        }
    }

    pub fn combo(&self) -> f64 {
        match self {
            FarmingState::KeepieUppie(game) => game.combo(),
            FarmingState::Lumberjack(game) => game.combo(),
        }
    }

    /// Advance the session clock. Returns `true` if the session ended during this tick.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        match self {
            FarmingState::KeepieUppie(game) => game.tick(elapsed_ms),
            FarmingState::Lumberjack(game) => {
                game.tick(elapsed_ms);
                false
            }
        }
    }

    /// Apply an input. Returns `true` if the session ended.
    pub fn process_input<D: DrawSource + ?Sized>(
        &mut self,
        input: FarmingInput,
        draws: &mut D,
    ) -> Result<bool, InvalidCommand> {
        if self.is_over() {
            return Err(InvalidCommand::NotActive);
        }
        match (self, input) {
            (FarmingState::KeepieUppie(game), FarmingInput::Tap) => {
                game.tap()?;
                Ok(false)
            }
            (FarmingState::Lumberjack(game), FarmingInput::Chop(side)) => game.chop(side, draws),
            (FarmingState::KeepieUppie(game), FarmingInput::Quit) => {
                game.quit();
                Ok(true)
            }
            (FarmingState::Lumberjack(game), FarmingInput::Quit) => {
                game.quit();
                Ok(true)
            }
            _ => Err(InvalidCommand::UnsupportedInput),
        }
    }

    /// Whole coins banked when the session ends.
    pub fn payout(&self) -> u64 {
        settle_amount(1, self.total())
    }

    pub fn view(&self, credited: Option<u64>) -> FarmingView {
        FarmingView {
            game: self.game(),
            combo: self.combo(),
            total: self.total(),
            over: self.is_over(),
            credited,
        }
    }
}

/// Presentation snapshot of a farming session.
#[derive(Clone, Debug, PartialEq)]
pub struct FarmingView {
    pub game: FarmingGame,
    pub combo: f64,
    /// Fractional earnings so far.
    pub total: f64,
    pub over: bool,
    /// Whole coins credited when the session ended.
    pub credited: Option<u64>,
}
