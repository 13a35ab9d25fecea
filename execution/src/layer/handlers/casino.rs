use super::super::*;
use crate::casino::{InvalidCommand, PlayerInput};
use kazik_types::{GameParams, GameType};
use tracing::warn;

impl<S: SnapshotStore> Layer<S> {
    /// Debit `stake` and start a wagering session.
    ///
    /// Every hidden outcome is drawn here. Single-shot games (Plinko, Roulette) come back already
    /// resolved and only need [`Layer::settle`]. Nothing is debited or created on rejection.
    pub fn start_session<D: DrawSource + ?Sized>(
        &mut self,
        params: GameParams,
        stake: u64,
        draws: &mut D,
    ) -> Result<SessionId, GameError> {
        params.validate().map_err(GameError::InvalidParams)?;
        let game = params.game_type();
        if !self.registry.is_active(game) {
            return Err(GameError::InvalidParams("game is not active"));
        }
        if stake == 0 {
            return Err(GameError::InvalidParams("stake must be greater than zero"));
        }
        if let Some(id) = self.unsettled_session() {
            return Err(GameError::SessionInProgress(id));
        }
        if game == GameType::Crash && !self.crash.betting_open() {
            return Err(InvalidCommand::BettingClosed.into());
        }

        self.ledger.debit(stake)?;

        let id = self.next_session_id;
        self.next_session_id += 1;
        let (state, result) = GameState::start(params, stake, &self.config, self.crash.round(), draws);
        let mut session = WagerSession::new(id, params, stake, state);
        session.apply(result);
        info!(
            session_id = id,
            game = %game,
            stake,
            status = session.status.as_str(),
            "casino game started"
        );
        self.sessions.insert(id, session);
        self.prune_history();
        Ok(id)
    }

    /// Apply a player input to an unsettled session.
    pub fn advance(&mut self, id: SessionId, input: PlayerInput) -> Result<SessionView, GameError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(GameError::UnknownSession(id))?;
        let outcome = if session.game_type() == GameType::Crash && input == PlayerInput::CashOut {
            session.cash_out_crash(&self.crash)
        } else {
            session.process_move(input)
        };
        match outcome {
            Ok(result) => {
                debug!(
                    session_id = id,
                    game = %session.game_type(),
                    ?input,
                    ?result,
                    move_count = session.move_count,
                    "casino move processed"
                );
                Ok(session.view())
            }
            Err(err) => {
                warn!(
                    session_id = id,
                    game = %session.game_type(),
                    ?input,
                    error = %err,
                    "casino move rejected"
                );
                Err(err.into())
            }
        }
    }

    /// Credit the resolved payout. A session is credited at most once.
    pub fn settle(&mut self, id: SessionId) -> Result<u64, GameError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(GameError::UnknownSession(id))?;
        if session.settled {
            return Err(InvalidCommand::AlreadySettled.into());
        }
        if !session.status.is_resolved() {
            return Err(InvalidCommand::NotResolved.into());
        }
        let payout = session.payout;
        self.ledger.credit(payout)?;
        session.settled = true;
        log_game_completion(session, self.ledger.balance());
        Ok(payout)
    }

    /// Abandon a session. An active session is resolved as a loss (forfeiting the stake); a
    /// session that already resolved is settled with its outcome.
    pub fn forfeit(&mut self, id: SessionId) -> Result<u64, GameError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(GameError::UnknownSession(id))?;
        if session.status == SessionStatus::Active {
            debug!(session_id = id, game = %session.game_type(), "casino session forfeited");
            session.apply(GameResult::Loss);
        }
        self.settle(id)
    }
}

pub(in crate::layer) fn log_game_completion(session: &WagerSession, balance: u64) {
    info!(
        session_id = session.id,
        game = %session.game_type(),
        stake = session.stake,
        outcome = session.status.as_str(),
        payout = session.payout,
        balance,
        "casino game completed"
    );
}
