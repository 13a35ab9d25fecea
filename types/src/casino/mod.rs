//! Casino domain types.
//!
//! Defines game parameters, player inputs and the ledger snapshot used by the execution layer
//! and the simulator.

mod codec;
mod constants;
mod game;
mod ledger;

pub use codec::{read_string, string_encode_size, write_string};
pub use constants::*;
pub use game::*;
pub use ledger::*;
