//! Monte-Carlo house-edge report.
//!
//! Every strategy is played through a real [`Layer`] over an in-memory store, one [`GameRng`]
//! stream per trial, so the report exercises the same debit/settle path as interactive play.

use anyhow::{Context as _, Result};
use kazik_execution::{casino::CrashPhase, GameRng, Layer, Memory, PlayerInput, SessionId};
use kazik_types::{
    casino::MINES_OPTIONS, EngineConfig, GameParams, PlinkoRisk, PlinkoRows, RouletteTarget,
    UserId,
};
use serde::Serialize;
use tracing::debug;

/// Crash loop resolution used by the report.
const TICK_MS: u64 = 100;

#[derive(Default, Clone, Debug)]
pub struct Stats {
    trials: u64,
    total_net: f64,
    total_net_sq: f64,
    total_wagered: f64,
}

impl Stats {
    pub fn add(&mut self, net: i64, wagered: u64) {
        let n = net as f64;
        self.trials += 1;
        self.total_net += n;
        self.total_net_sq += n * n;
        self.total_wagered += wagered as f64;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn mean_net(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_net / self.trials as f64
        }
    }

    pub fn mean_wagered(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_wagered / self.trials as f64
        }
    }

    pub fn house_edge(&self) -> f64 {
        let mw = self.mean_wagered();
        if mw == 0.0 {
            0.0
        } else {
            -self.mean_net() / mw
        }
    }

    /// Standard error of the mean net result.
    pub fn stderr(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let mean = self.mean_net();
        let var = (self.total_net_sq / self.trials as f64) - mean * mean;
        let var = if var < 0.0 { 0.0 } else { var };
        (var / self.trials as f64).sqrt()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ResultRow {
    pub game: String,
    pub strategy: String,
    pub trials: u64,
    pub avg_wagered: f64,
    pub avg_net: f64,
    pub house_edge: f64,
    pub stderr: f64,
}

/// A fixed way of playing one game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    /// Cash out once the multiplier reaches `target` hundredths.
    Crash { target: u64 },
    /// Reveal cells 0, 1, ... and cash out after `reveals` safe cells.
    Mines { mines: u8, reveals: u8 },
    /// Always take door 0 and cash out after `levels` cleared levels.
    Dungeon { difficulty: u8, levels: u8 },
    Plinko { rows: PlinkoRows, risk: PlinkoRisk },
    Roulette { target: RouletteTarget },
}

impl Strategy {
    pub fn params(&self) -> GameParams {
        match *self {
            Strategy::Crash { .. } => GameParams::Crash,
            Strategy::Mines { mines, .. } => GameParams::Mines { mines },
            Strategy::Dungeon { difficulty, .. } => GameParams::Dungeon { difficulty },
            Strategy::Plinko { rows, risk } => GameParams::Plinko { rows, risk },
            Strategy::Roulette { target } => GameParams::Roulette { target },
        }
    }

    pub fn label(&self) -> String {
        match self {
            Strategy::Crash { target } => {
                format!("CASH_OUT_{}.{:02}X", target / 100, target % 100)
            }
            Strategy::Mines { mines, reveals } => format!("MINES_{mines}_REVEAL_{reveals}"),
            Strategy::Dungeon { difficulty, levels } => {
                format!("DOORS_{difficulty}_CLIMB_{levels}")
            }
            Strategy::Plinko { rows, risk } => {
                format!("ROWS_{}_{}", rows.count(), format!("{risk:?}").to_uppercase())
            }
            Strategy::Roulette { target } => match target {
                RouletteTarget::Number(n) => format!("STRAIGHT_{n}"),
                other => format!("{other:?}").to_uppercase(),
            },
        }
    }
}

/// Strategies covered by the report.
pub fn default_strategies() -> Vec<Strategy> {
    let mut strategies = vec![
        Strategy::Crash { target: 150 },
        Strategy::Crash { target: 200 },
        Strategy::Dungeon {
            difficulty: 2,
            levels: 1,
        },
        Strategy::Dungeon {
            difficulty: 3,
            levels: 3,
        },
        Strategy::Plinko {
            rows: PlinkoRows::Eight,
            risk: PlinkoRisk::Low,
        },
        Strategy::Plinko {
            rows: PlinkoRows::Twelve,
            risk: PlinkoRisk::Medium,
        },
        Strategy::Plinko {
            rows: PlinkoRows::Sixteen,
            risk: PlinkoRisk::High,
        },
        Strategy::Roulette {
            target: RouletteTarget::Red,
        },
        Strategy::Roulette {
            target: RouletteTarget::Green,
        },
        Strategy::Roulette {
            target: RouletteTarget::Number(17),
        },
    ];
    // Two reveals on every board the mines screen offers.
    strategies.extend(
        MINES_OPTIONS
            .iter()
            .map(|&mines| Strategy::Mines { mines, reveals: 2 }),
    );
    strategies
}

fn play_crash(
    layer: &mut Layer<Memory>,
    stake: u64,
    target: u64,
    draws: &mut GameRng,
) -> Result<u64> {
    while !matches!(layer.crash_view().phase, CrashPhase::Waiting { .. }) {
        layer.tick(TICK_MS, draws)?;
    }
    let id = layer.start_session(GameParams::Crash, stake, draws)?;
    loop {
        let view = layer.tick(TICK_MS, draws)?;
        let session = layer.session(id).context("crash session missing")?;
        if session.settled {
            return Ok(session.payout);
        }
        if matches!(view.phase, CrashPhase::Flying { .. }) && view.multiplier >= target {
            layer.advance(id, PlayerInput::CashOut)?;
            return Ok(layer.settle(id)?);
        }
    }
}

/// Feed `inputs` until the session resolves, then cash out if it is still running.
fn play_steps(
    layer: &mut Layer<Memory>,
    id: SessionId,
    inputs: impl Iterator<Item = PlayerInput>,
) -> Result<u64> {
    for input in inputs {
        if layer.advance(id, input)?.status.is_resolved() {
            return Ok(layer.settle(id)?);
        }
    }
    layer.advance(id, PlayerInput::CashOut)?;
    Ok(layer.settle(id)?)
}

/// Play one round of `strategy` and return the payout credited.
fn play(
    layer: &mut Layer<Memory>,
    strategy: Strategy,
    stake: u64,
    draws: &mut GameRng,
) -> Result<u64> {
    match strategy {
        Strategy::Crash { target } => play_crash(layer, stake, target, draws),
        Strategy::Mines { reveals, .. } => {
            let id = layer.start_session(strategy.params(), stake, draws)?;
            play_steps(layer, id, (0..reveals).map(|cell| PlayerInput::Reveal { cell }))
        }
        Strategy::Dungeon { levels, .. } => {
            let id = layer.start_session(strategy.params(), stake, draws)?;
            play_steps(
                layer,
                id,
                (0..levels).map(|_| PlayerInput::OpenDoor { door: 0 }),
            )
        }
        Strategy::Plinko { .. } | Strategy::Roulette { .. } => {
            let id = layer.start_session(strategy.params(), stake, draws)?;
            Ok(layer.settle(id)?)
        }
    }
}

/// Play `trials` rounds of `strategy`, trial `i` drawing from `GameRng::new(seed, i, 0)`.
pub fn simulate(strategy: Strategy, stake: u64, trials: u64, seed: u64) -> Result<Stats> {
    let config = EngineConfig {
        starting_balance: stake.saturating_mul(trials).max(1),
        ..EngineConfig::default()
    };
    let user = UserId::new("house-edge").context("invalid user id")?;
    let mut layer = Layer::open(Memory::default(), user, config)?;

    let mut stats = Stats::default();
    for trial in 0..trials {
        let mut draws = GameRng::new(seed, trial, 0);
        let payout = play(&mut layer, strategy, stake, &mut draws)
            .with_context(|| format!("{} trial {trial}", strategy.label()))?;
        stats.add(payout as i64 - stake as i64, stake);
    }
    debug!(
        strategy = %strategy.label(),
        trials,
        edge = stats.house_edge(),
        "strategy simulated"
    );
    Ok(stats)
}

/// Simulate every default strategy.
pub fn run_report(trials: u64, seed: u64, stake: u64) -> Result<Vec<ResultRow>> {
    default_strategies()
        .into_iter()
        .map(|strategy| {
            let stats = simulate(strategy, stake, trials, seed)?;
            Ok(ResultRow {
                game: strategy.params().game_type().to_string(),
                strategy: strategy.label(),
                trials: stats.trials(),
                avg_wagered: stats.mean_wagered(),
                avg_net: stats.mean_net(),
                house_edge: stats.house_edge(),
                stderr: stats.stderr(),
            })
        })
        .collect()
}
