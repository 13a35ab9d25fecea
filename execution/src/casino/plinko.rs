//! Plinko.
//!
//! One binary draw per row; the ball bounces right when the draw is above one half. The bucket is
//! the number of right bounces, and each (rows, risk) board has a symmetric multiplier table in
//! basis points.

use kazik_types::{
    casino::BASIS_POINTS,
    PlinkoRisk, PlinkoRows, Side,
};

use super::{CasinoGame, GameResult, InvalidCommand, PlayerInput};
use crate::rng::DrawSource;

const EIGHT_LOW: [u64; 9] = [56_000, 21_000, 11_000, 10_000, 5_000, 10_000, 11_000, 21_000, 56_000];
const EIGHT_MEDIUM: [u64; 9] = [
    130_000, 30_000, 13_000, 7_000, 4_000, 7_000, 13_000, 30_000, 130_000,
];
const EIGHT_HIGH: [u64; 9] = [
    290_000, 40_000, 15_000, 3_000, 2_000, 3_000, 15_000, 40_000, 290_000,
];
const TWELVE_LOW: [u64; 13] = [
    100_000, 30_000, 16_000, 14_000, 11_000, 10_000, 5_000, 10_000, 11_000, 14_000, 16_000,
    30_000, 100_000,
];

/// Centre bucket of generated boards.
const CENTRE_BPS: u64 = 3_000;
/// Generated boards: `0.5 + distance² × factor`.
const GENERATED_BASE_BPS: u64 = 5_000;

fn generated_factor_bps(risk: PlinkoRisk) -> u64 {
    match risk {
        PlinkoRisk::Low => 1_000,
        PlinkoRisk::Medium => 3_000,
        PlinkoRisk::High => 8_000,
    }
}

/// Bucket multipliers in basis points, `rows + 1` entries.
pub fn multiplier_table(rows: PlinkoRows, risk: PlinkoRisk) -> Vec<u64> {
    match (rows, risk) {
        (PlinkoRows::Eight, PlinkoRisk::Low) => EIGHT_LOW.to_vec(),
        (PlinkoRows::Eight, PlinkoRisk::Medium) => EIGHT_MEDIUM.to_vec(),
        (PlinkoRows::Eight, PlinkoRisk::High) => EIGHT_HIGH.to_vec(),
        (PlinkoRows::Twelve, PlinkoRisk::Low) => TWELVE_LOW.to_vec(),
        _ => {
            let count = rows.count();
            let middle = count / 2;
            let factor = generated_factor_bps(risk);
            (0..=count)
                .map(|bucket| {
                    let distance = bucket.abs_diff(middle) as u64;
                    if distance == 0 {
                        CENTRE_BPS
                    } else {
                        GENERATED_BASE_BPS + distance * distance * factor
                    }
                })
                .collect()
        }
    }
}

/// One bounce per row.
pub fn drop_path<D: DrawSource + ?Sized>(rows: PlinkoRows, draws: &mut D) -> Vec<Side> {
    (0..rows.count())
        .map(|_| {
            if draws.next_unit() > 0.5 {
                Side::Right
            } else {
                Side::Left
            }
        })
        .collect()
}

/// A resolved drop.
#[derive(Clone, Debug)]
pub struct PlinkoDrop {
    rows: PlinkoRows,
    risk: PlinkoRisk,
    path: Vec<Side>,
    multiplier_bps: u64,
}

impl PlinkoDrop {
    pub fn drop<D: DrawSource + ?Sized>(
        rows: PlinkoRows,
        risk: PlinkoRisk,
        stake: u64,
        draws: &mut D,
    ) -> (Self, GameResult) {
        let path = drop_path(rows, draws);
        let bucket = path.iter().filter(|side| **side == Side::Right).count();
        let multiplier_bps = multiplier_table(rows, risk)[bucket];
        let payout = (stake as u128 * multiplier_bps as u128 / BASIS_POINTS as u128)
            .min(u64::MAX as u128) as u64;
        let result = if payout > 0 {
            GameResult::Win(payout)
        } else {
            GameResult::Loss
        };
        (
            Self {
                rows,
                risk,
                path,
                multiplier_bps,
            },
            result,
        )
    }

    pub fn rows(&self) -> PlinkoRows {
        self.rows
    }

    pub fn risk(&self) -> PlinkoRisk {
        self.risk
    }

    pub fn path(&self) -> &[Side] {
        &self.path
    }

    pub fn bucket(&self) -> usize {
        self.path.iter().filter(|side| **side == Side::Right).count()
    }

    pub fn multiplier_bps(&self) -> u64 {
        self.multiplier_bps
    }
}

impl CasinoGame for PlinkoDrop {
    fn process_move(&mut self, _: u64, _: PlayerInput) -> Result<GameResult, InvalidCommand> {
        // No decisions after the drop.
        Err(InvalidCommand::NotActive)
    }

    fn multiplier(&self) -> f64 {
        self.multiplier_bps as f64 / BASIS_POINTS as f64
    }
}
