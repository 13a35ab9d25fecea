mod bonus;
mod casino;
mod farming;

pub use bonus::BonusClaim;
pub(super) use casino::log_game_completion;
