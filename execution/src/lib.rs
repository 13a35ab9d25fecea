//! Kazik wagering engine.
//!
//! This crate contains the single-user wagering engine (`Layer`): the balance ledger, the outcome
//! generators and session state machines for every game, the daily bonus, and snapshot storage.
//!
//! ## Determinism requirements
//! - Do not read the wall clock inside the engine; callers pass `now_ms` and elapsed time.
//! - Do not call a global random source; every draw comes from the supplied [`DrawSource`].
//! - All hidden outcomes are drawn when a session starts, so player inputs consume no draws.
//!
//! ## Ledger invariants
//! The balance changes only through a debit (stake at session start) or a credit (settlement,
//! farming, bonus). Each mutation is persisted before it becomes observable, and a session is
//! credited at most once.
//!
//! The primary entrypoint is [`Layer`].
//!
//! ## Minimal session (example)
//! ```rust
//! use kazik_execution::{casino::PlayerInput, EntropyDraws, Layer, Memory};
//! use kazik_types::{EngineConfig, GameParams, UserId};
//!
//! # fn main() -> anyhow::Result<()> {
//! let user = UserId::new("player").expect("valid user id");
//! let mut layer = Layer::open(Memory::default(), user, EngineConfig::default())?;
//! let mut draws = EntropyDraws::seeded(7);
//!
//! let id = layer.start_session(GameParams::Mines { mines: 3 }, 100, &mut draws)?;
//! assert_eq!(layer.balance(), 900);
//! let view = layer.advance(id, PlayerInput::Reveal { cell: 0 })?;
//! if !view.status.is_resolved() {
//!     layer.advance(id, PlayerInput::CashOut)?;
//! }
//! let payout = layer.settle(id)?;
//! assert_eq!(layer.balance(), 900 + payout);
//! # Ok(())
//! # }
//! ```

pub mod casino;
pub mod ledger;
pub mod rng;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod layer;

mod state;

pub use casino::{
    FarmingInput, FarmingView, GameError, GameResult, InvalidCommand, PlayerInput, SessionId,
    SessionStatus, SessionView,
};
pub use layer::{BonusClaim, Layer};
pub use ledger::{Ledger, LedgerError};
#[cfg(any(test, feature = "mocks"))]
pub use rng::FixedDraws;
pub use rng::{DrawSource, EntropyDraws, GameRng};
pub use state::{FileStore, Memory, SnapshotStore};
