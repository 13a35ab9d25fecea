//! The shared balance ledger.
//!
//! Every mutation is applied to a copy of the snapshot, persisted, and only then swapped in, so a
//! failed write leaves both the stored and the in-memory balance untouched.

use kazik_types::{LedgerSnapshot, UserId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::SnapshotStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds (balance={balance}, requested={requested})")]
    InsufficientFunds { balance: u64, requested: u64 },
    #[error("bonus on cooldown ({remaining_minutes} min remaining)")]
    CooldownActive { remaining_minutes: u64 },
    #[error("storage: {0}")]
    Storage(String),
}

/// Milliseconds rounded up to whole minutes.
pub fn ceil_minutes(ms: u64) -> u64 {
    ms.div_ceil(60_000)
}

pub struct Ledger<S: SnapshotStore> {
    store: S,
    snapshot: LedgerSnapshot,
}

impl<S: SnapshotStore> Ledger<S> {
    /// Load the user's snapshot, creating and persisting one with `starting_balance` if absent.
    pub fn open(store: S, user: UserId, starting_balance: u64) -> anyhow::Result<Self> {
        let ledger = match store.load(&user)? {
            Some(snapshot) => Self { store, snapshot },
            None => {
                let snapshot = LedgerSnapshot::new(user, starting_balance);
                let mut ledger = Self { store, snapshot };
                ledger.store.save(&ledger.snapshot)?;
                ledger
            }
        };
        debug!(
            user = %ledger.snapshot.user,
            balance = ledger.snapshot.balance,
            "ledger opened"
        );
        Ok(ledger)
    }

    pub fn user(&self) -> &UserId {
        &self.snapshot.user
    }

    pub fn balance(&self) -> u64 {
        self.snapshot.balance
    }

    pub fn last_bonus_claimed_at(&self) -> Option<u64> {
        self.snapshot.last_bonus_claimed_at
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn commit(&mut self, next: LedgerSnapshot) -> Result<(), LedgerError> {
        if let Err(err) = self.store.save(&next) {
            warn!(user = %self.snapshot.user, error = %err, "ledger write failed");
            return Err(LedgerError::Storage(format!("{err:#}")));
        }
        self.snapshot = next;
        Ok(())
    }

    /// Subtract `amount`, failing without any change if it exceeds the balance.
    pub fn debit(&mut self, amount: u64) -> Result<u64, LedgerError> {
        let balance = self.snapshot.balance;
        let Some(remaining) = balance.checked_sub(amount) else {
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        };
        let mut next = self.snapshot.clone();
        next.balance = remaining;
        self.commit(next)?;
        Ok(remaining)
    }

    /// Add `amount`, saturating at `u64::MAX`. Only storage can fail.
    pub fn credit(&mut self, amount: u64) -> Result<u64, LedgerError> {
        let balance = self.snapshot.balance.saturating_add(amount);
        if amount == 0 {
            return Ok(balance);
        }
        let mut next = self.snapshot.clone();
        next.balance = balance;
        self.commit(next)?;
        Ok(balance)
    }

    /// Milliseconds until the bonus can be claimed again (0 when available).
    pub fn bonus_remaining_ms(&self, now_ms: u64, cooldown_ms: u64) -> u64 {
        match self.snapshot.last_bonus_claimed_at {
            None => 0,
            Some(last) => cooldown_ms.saturating_sub(now_ms.saturating_sub(last)),
        }
    }

    /// Credit `amount` if at least `cooldown_ms` has passed since the last claim.
    pub fn claim_daily_bonus(
        &mut self,
        now_ms: u64,
        cooldown_ms: u64,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let remaining = self.bonus_remaining_ms(now_ms, cooldown_ms);
        if remaining > 0 {
            return Err(LedgerError::CooldownActive {
                remaining_minutes: ceil_minutes(remaining),
            });
        }
        let mut next = self.snapshot.clone();
        next.balance = next.balance.saturating_add(amount);
        next.last_bonus_claimed_at = Some(now_ms);
        let balance = next.balance;
        self.commit(next)?;
        Ok(balance)
    }

    /// Administrative overwrite of the balance.
    pub fn set_balance(&mut self, amount: u64) -> Result<u64, LedgerError> {
        let mut next = self.snapshot.clone();
        next.balance = amount;
        self.commit(next)?;
        Ok(amount)
    }
}
