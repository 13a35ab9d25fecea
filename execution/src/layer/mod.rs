use anyhow::Context as _;
use kazik_types::{EngineConfig, UserId};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::casino::{
    registry::GameRegistry, CrashEvent, CrashRound, CrashView, FarmingState, GameError,
    GameResult, GameState, SessionId, SessionStatus, SessionView, WagerSession,
};
use crate::ledger::Ledger;
use crate::rng::DrawSource;
use crate::state::SnapshotStore;

mod handlers;

use handlers::log_game_completion;
pub use handlers::BonusClaim;

/// Settled sessions kept around for [`Layer::session`] lookups.
const SETTLED_HISTORY: usize = 32;

struct FarmingSlot {
    state: FarmingState,
    /// Whole coins credited once the session ended. `None` until banked.
    credited: Option<u64>,
}

/// The engine facade for a single user.
///
/// Owns the ledger, the shared crash round loop, and every session. Wagering sessions debit the
/// stake when they start and credit their payout exactly once when settled; at most one of them
/// may be unsettled at a time. Farming sessions never debit and run alongside wagering.
pub struct Layer<S: SnapshotStore> {
    ledger: Ledger<S>,
    config: EngineConfig,
    registry: GameRegistry,
    crash: CrashRound,
    sessions: BTreeMap<SessionId, WagerSession>,
    next_session_id: SessionId,
    farming: Option<FarmingSlot>,
}

impl<S: SnapshotStore> Layer<S> {
    /// Open the user's ledger (creating it with the configured starting balance if absent).
    pub fn open(store: S, user: UserId, config: EngineConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid engine configuration")?;
        let ledger = Ledger::open(store, user, config.starting_balance)
            .context("failed to open ledger")?;
        info!(
            user = %ledger.user(),
            balance = ledger.balance(),
            "engine opened"
        );
        Ok(Self {
            ledger,
            crash: CrashRound::new(config.crash.clone()),
            config,
            registry: GameRegistry::default(),
            sessions: BTreeMap::new(),
            next_session_id: 1,
            farming: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GameRegistry {
        &mut self.registry
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        self.ledger.store_mut()
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn last_bonus_claimed_at(&self) -> Option<u64> {
        self.ledger.last_bonus_claimed_at()
    }

    pub fn session(&self, id: SessionId) -> Option<SessionView> {
        self.sessions.get(&id).map(WagerSession::view)
    }

    /// The unsettled wagering session, if any.
    pub fn active_session(&self) -> Option<SessionView> {
        self.unsettled_session()
            .and_then(|id| self.sessions.get(&id))
            .map(WagerSession::view)
    }

    fn unsettled_session(&self) -> Option<SessionId> {
        self.sessions
            .values()
            .find(|session| !session.settled)
            .map(|session| session.id)
    }

    /// Rescue the balance back to the configured amount.
    pub fn reset_balance(&mut self) -> Result<u64, GameError> {
        self.set_balance(self.config.rescue_balance)
    }

    /// Overwrite the balance. Refused while a wagering session is unsettled.
    pub fn set_balance(&mut self, amount: u64) -> Result<u64, GameError> {
        if let Some(id) = self.unsettled_session() {
            return Err(GameError::SessionInProgress(id));
        }
        let previous = self.ledger.balance();
        let balance = self.ledger.set_balance(amount)?;
        info!(
            user = %self.ledger.user(),
            previous,
            balance,
            "balance overwritten"
        );
        Ok(balance)
    }

    /// Advance the shared crash round and the farming clock by `elapsed_ms`.
    ///
    /// Crash bets still riding when their round crashes are settled as losses. A farming session
    /// that ends during the tick is banked.
    pub fn tick<D: DrawSource + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        draws: &mut D,
    ) -> Result<CrashView, GameError> {
        for event in self.crash.tick(elapsed_ms, draws) {
            match event {
                CrashEvent::Launched { round } => debug!(round, "crash round launched"),
                CrashEvent::Crashed { round, crash_point } => {
                    debug!(round, crash_point, "crash round crashed");
                    self.resolve_crashed_round(round);
                }
            }
        }
        self.tick_farming(elapsed_ms)?;
        Ok(self.crash.view())
    }

    pub fn crash_view(&self) -> CrashView {
        self.crash.view()
    }

    /// Settle the bets still riding in `round` as losses. A zero credit never writes, so this
    /// cannot fail on storage.
    fn resolve_crashed_round(&mut self, round: u64) {
        let riding: Vec<SessionId> = self
            .sessions
            .values()
            .filter(|session| session.status == SessionStatus::Active)
            .filter(|session| matches!(&session.state, GameState::Crash(bet) if bet.round() == round))
            .map(|session| session.id)
            .collect();
        for id in riding {
            let Some(session) = self.sessions.get_mut(&id) else {
                continue;
            };
            session.apply(GameResult::Loss);
            session.settled = true;
            log_game_completion(session, self.ledger.balance());
        }
    }

    /// Drop the oldest settled sessions beyond the history limit.
    fn prune_history(&mut self) {
        let settled: Vec<SessionId> = self
            .sessions
            .values()
            .filter(|session| session.settled)
            .map(|session| session.id)
            .collect();
        let excess = settled.len().saturating_sub(SETTLED_HISTORY);
        for id in settled.into_iter().take(excess) {
            self.sessions.remove(&id);
        }
    }
}
