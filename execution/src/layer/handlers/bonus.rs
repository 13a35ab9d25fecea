use super::super::*;
use crate::ledger::ceil_minutes;
use tracing::warn;

/// Outcome of a daily bonus claim as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusClaim {
    pub success: bool,
    pub message: String,
}

impl<S: SnapshotStore> Layer<S> {
    /// Credit the daily bonus if the cooldown has elapsed. Returns the new balance.
    pub fn claim_daily_bonus(&mut self, now_ms: u64) -> Result<u64, GameError> {
        let amount = self.config.bonus_amount;
        match self
            .ledger
            .claim_daily_bonus(now_ms, self.config.bonus_cooldown_ms, amount)
        {
            Ok(balance) => {
                info!(
                    user = %self.ledger.user(),
                    amount,
                    balance,
                    claimed_at = now_ms,
                    "daily bonus claimed"
                );
                Ok(balance)
            }
            Err(err) => {
                debug!(user = %self.ledger.user(), error = %err, "daily bonus refused");
                Err(err.into())
            }
        }
    }

    pub fn claim_daily_bonus_message(&mut self, now_ms: u64) -> BonusClaim {
        match self.claim_daily_bonus(now_ms) {
            Ok(_) => BonusClaim {
                success: true,
                message: format!("claimed {} coins", self.config.bonus_amount),
            },
            Err(GameError::CooldownActive { remaining_minutes }) => BonusClaim {
                success: false,
                message: format!("Wait {remaining_minutes} mins"),
            },
            Err(err) => {
                warn!(error = %err, "daily bonus failed");
                BonusClaim {
                    success: false,
                    message: err.to_string(),
                }
            }
        }
    }

    /// Milliseconds until the bonus can be claimed again (0 when available).
    pub fn bonus_remaining_ms(&self, now_ms: u64) -> u64 {
        self.ledger
            .bonus_remaining_ms(now_ms, self.config.bonus_cooldown_ms)
    }

    pub fn bonus_remaining_minutes(&self, now_ms: u64) -> u64 {
        ceil_minutes(self.bonus_remaining_ms(now_ms))
    }
}
