//! Crash.
//!
//! A shared round loop: a betting window (`Waiting`), a flight during which the multiplier grows as
//! `floor(100·e^(k·t))/100`, and a pause after the crash. The crash point is drawn when the round
//! launches as `max(1.00, 0.99 / (1 - r))`.
//!
//! Multipliers are held in hundredths so cash-out payouts are computed in integers.

use kazik_types::{casino::CRASH_EDGE_FACTOR, CrashConfig};

use crate::rng::DrawSource;

use super::{GameResult, InvalidCommand};

/// Crash point for a uniform draw `r` in `[0, 1)`.
pub fn crash_point(r: f64) -> f64 {
    (CRASH_EDGE_FACTOR / (1.0 - r)).max(1.0)
}

/// Running multiplier in hundredths after `elapsed_ms` of flight.
pub fn multiplier_hundredths(elapsed_ms: u64, growth_rate: f64) -> u64 {
    let seconds = elapsed_ms as f64 / 1000.0;
    // Saturating float-to-int cast.
    (100.0 * (growth_rate * seconds).exp()).floor() as u64
}

/// `floor(stake × hundredths / 100)`.
pub fn cash_out_payout(stake: u64, hundredths: u64) -> u64 {
    let payout = stake as u128 * hundredths as u128 / 100;
    payout.min(u64::MAX as u128) as u64
}

fn crash_point_hundredths(crash_point: f64) -> u64 {
    (crash_point * 100.0 + super::SETTLEMENT_EPSILON).floor() as u64
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrashPhase {
    /// Bets accepted until the countdown reaches zero.
    Waiting { remaining_ms: u64 },
    Flying { elapsed_ms: u64, crash_point: f64 },
    Crashed { remaining_ms: u64, crash_point: f64 },
}

/// Transitions reported by [`CrashRound::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrashEvent {
    Launched { round: u64 },
    Crashed { round: u64, crash_point: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrashView {
    pub round: u64,
    pub phase: CrashPhase,
    /// Multiplier in hundredths (100 while waiting, the crash point once crashed).
    pub multiplier: u64,
}

/// The shared crash round loop.
#[derive(Clone, Debug)]
pub struct CrashRound {
    round: u64,
    phase: CrashPhase,
    config: CrashConfig,
}

impl CrashRound {
    pub fn new(config: CrashConfig) -> Self {
        Self {
            round: 1,
            phase: CrashPhase::Waiting {
                remaining_ms: config.cooldown_ms,
            },
            config,
        }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn phase(&self) -> CrashPhase {
        self.phase
    }

    pub fn betting_open(&self) -> bool {
        matches!(self.phase, CrashPhase::Waiting { .. })
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.phase, CrashPhase::Flying { .. })
    }

    pub fn multiplier(&self) -> u64 {
        match self.phase {
            CrashPhase::Waiting { .. } => 100,
            CrashPhase::Flying { elapsed_ms, .. } => {
                multiplier_hundredths(elapsed_ms, self.config.growth_rate)
            }
            CrashPhase::Crashed { crash_point, .. } => crash_point_hundredths(crash_point),
        }
    }

    pub fn view(&self) -> CrashView {
        CrashView {
            round: self.round,
            phase: self.phase,
            multiplier: self.multiplier(),
        }
    }

    /// Advance the loop by `elapsed_ms`.
    ///
    /// Countdown time carries across phase boundaries. A flight consumes the rest of the tick and
    /// crashes at its end if the multiplier has reached the crash point.
    pub fn tick<D: DrawSource + ?Sized>(
        &mut self,
        elapsed_ms: u64,
        draws: &mut D,
    ) -> Vec<CrashEvent> {
        let mut left = elapsed_ms;
        let mut events = Vec::new();
        loop {
            match self.phase {
                CrashPhase::Waiting { remaining_ms } => {
                    if left < remaining_ms {
                        self.phase = CrashPhase::Waiting {
                            remaining_ms: remaining_ms - left,
                        };
                        break;
                    }
                    left -= remaining_ms;
                    self.phase = CrashPhase::Flying {
                        elapsed_ms: 0,
                        crash_point: crash_point(draws.next_unit()),
                    };
                    events.push(CrashEvent::Launched { round: self.round });
                }
                CrashPhase::Flying {
                    elapsed_ms,
                    crash_point,
                } => {
                    let elapsed_ms = elapsed_ms.saturating_add(left);
                    let current = multiplier_hundredths(elapsed_ms, self.config.growth_rate);
                    if current as f64 / 100.0 >= crash_point {
                        self.phase = CrashPhase::Crashed {
                            remaining_ms: self.config.crashed_pause_ms,
                            crash_point,
                        };
                        events.push(CrashEvent::Crashed {
                            round: self.round,
                            crash_point,
                        });
                    } else {
                        self.phase = CrashPhase::Flying {
                            elapsed_ms,
                            crash_point,
                        };
                    }
                    break;
                }
                CrashPhase::Crashed {
                    remaining_ms,
                    crash_point,
                } => {
                    if left < remaining_ms {
                        self.phase = CrashPhase::Crashed {
                            remaining_ms: remaining_ms - left,
                            crash_point,
                        };
                        break;
                    }
                    left -= remaining_ms;
                    self.round += 1;
                    self.phase = CrashPhase::Waiting {
                        remaining_ms: self.config.cooldown_ms,
                    };
                }
            }
        }
        events
    }
}

/// A player's bet on one crash round.
#[derive(Clone, Debug)]
pub struct CrashBet {
    round: u64,
    cashed_out_at: Option<u64>,
}

impl CrashBet {
    pub fn new(round: u64) -> Self {
        Self {
            round,
            cashed_out_at: None,
        }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    /// Multiplier in hundredths at which the bet was cashed out.
    pub fn cashed_out_at(&self) -> Option<u64> {
        self.cashed_out_at
    }

    pub fn multiplier(&self) -> f64 {
        self.cashed_out_at.unwrap_or(100) as f64 / 100.0
    }

    /// Take the running multiplier of `round`. Only valid while this bet's round is flying.
    pub fn cash_out(&mut self, stake: u64, round: &CrashRound) -> Result<GameResult, InvalidCommand> {
        if self.cashed_out_at.is_some() {
            return Err(InvalidCommand::AlreadyCashedOut);
        }
        if round.round() != self.round || !round.is_flying() {
            return Err(InvalidCommand::NotActive);
        }
        let hundredths = round.multiplier();
        self.cashed_out_at = Some(hundredths);
        Ok(GameResult::CashOut(cash_out_payout(stake, hundredths)))
    }
}
