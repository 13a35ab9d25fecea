use super::super::*;
use crate::casino::{FarmingInput, FarmingView, InvalidCommand};
use kazik_types::{FarmingGame, GameType};
use tracing::warn;

impl<S: SnapshotStore> Layer<S> {
    /// Start a farming session, replacing one that already ended.
    pub fn start_farming(&mut self, game: FarmingGame) -> Result<FarmingView, GameError> {
        if !self.registry.is_active(game.into()) {
            return Err(GameError::InvalidParams("game is not active"));
        }
        if let Some(slot) = &self.farming {
            if !slot.state.is_over() {
                return Err(GameError::FarmingInProgress);
            }
        }
        // An ended session whose credit failed gets another attempt before it is dropped.
        self.bank_farming()?;

        let state = FarmingState::new(game);
        let view = state.view(None);
        self.farming = Some(FarmingSlot {
            state,
            credited: None,
        });
        info!(game = %GameType::from(game), "farming session started");
        Ok(view)
    }

    pub fn farming(&self) -> Option<FarmingView> {
        self.farming
            .as_ref()
            .map(|slot| slot.state.view(slot.credited))
    }

    /// Apply a tap, chop, or quit to the running farming session.
    pub fn farm<D: DrawSource + ?Sized>(
        &mut self,
        input: FarmingInput,
        draws: &mut D,
    ) -> Result<FarmingView, GameError> {
        let slot = self
            .farming
            .as_mut()
            .ok_or(GameError::InvalidCommand(InvalidCommand::NotActive))?;
        let game = GameType::from(slot.state.game());
        match slot.state.process_input(input, draws) {
            Ok(ended) => {
                debug!(
                    game = %game,
                    ?input,
                    total = slot.state.total(),
                    combo = slot.state.combo(),
                    ended,
                    "farming input processed"
                );
                if ended {
                    self.bank_farming()?;
                }
            }
            Err(err) => {
                warn!(game = %game, ?input, error = %err, "farming input rejected");
                self.bank_farming()?;
                return Err(err.into());
            }
        }
        self.farming()
            .ok_or(GameError::InvalidCommand(InvalidCommand::NotActive))
    }

    pub(in crate::layer) fn tick_farming(&mut self, elapsed_ms: u64) -> Result<(), GameError> {
        let Some(slot) = self.farming.as_mut() else {
            return Ok(());
        };
        if slot.state.tick(elapsed_ms) {
            debug!(
                game = %GameType::from(slot.state.game()),
                total = slot.state.total(),
                "farming session ended"
            );
        }
        self.bank_farming()
    }

    /// Credit `floor(total)` for an ended session that has not been banked yet.
    fn bank_farming(&mut self) -> Result<(), GameError> {
        let Some(slot) = self.farming.as_mut() else {
            return Ok(());
        };
        if !slot.state.is_over() || slot.credited.is_some() {
            return Ok(());
        }
        let amount = slot.state.payout();
        let balance = self.ledger.credit(amount)?;
        slot.credited = Some(amount);
        info!(
            game = %GameType::from(slot.state.game()),
            total = slot.state.total(),
            credited = amount,
            balance,
            "farming session banked"
        );
        Ok(())
    }
}
