//! Roulette (single zero).
//!
//! One draw picks a pocket index on the physical wheel order. Pockets alternate colour around
//! the wheel: even indices are red, odd ones black, and the zero pocket is green. Payouts are
//! total return: straight number 36x, red/black 2x, green (zero) 14x.

use kazik_types::casino::{ROULETTE_POCKETS, RouletteTarget};

use super::{CasinoGame, GameResult, InvalidCommand, PlayerInput};
use crate::rng::DrawSource;

/// Pocket numbers in wheel order.
pub const WHEEL: [u8; ROULETTE_POCKETS] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

/// Colour of the pocket at wheel index `pocket`.
pub fn color_of(pocket: usize) -> PocketColor {
    if WHEEL[pocket % ROULETTE_POCKETS] == 0 {
        PocketColor::Green
    } else if pocket % 2 == 0 {
        PocketColor::Red
    } else {
        PocketColor::Black
    }
}

/// Total-return multiplier for a winning bet on `target`.
pub fn payout_multiplier(target: RouletteTarget) -> u64 {
    match target {
        RouletteTarget::Number(_) => 36,
        RouletteTarget::Red | RouletteTarget::Black => 2,
        RouletteTarget::Green => 14,
    }
}

pub fn bet_wins(target: RouletteTarget, pocket: usize) -> bool {
    match target {
        RouletteTarget::Number(n) => WHEEL[pocket % ROULETTE_POCKETS] == n,
        RouletteTarget::Red => color_of(pocket) == PocketColor::Red,
        RouletteTarget::Black => color_of(pocket) == PocketColor::Black,
        RouletteTarget::Green => color_of(pocket) == PocketColor::Green,
    }
}

/// Pick a pocket index in wheel order.
pub fn spin_pocket<D: DrawSource + ?Sized>(draws: &mut D) -> usize {
    draws.next_index(ROULETTE_POCKETS)
}

/// A resolved spin.
#[derive(Clone, Debug)]
pub struct RouletteSpin {
    target: RouletteTarget,
    pocket: usize,
}

impl RouletteSpin {
    pub fn spin<D: DrawSource + ?Sized>(
        target: RouletteTarget,
        stake: u64,
        draws: &mut D,
    ) -> (Self, GameResult) {
        let spin = Self {
            target,
            pocket: spin_pocket(draws),
        };
        let result = if bet_wins(target, spin.pocket) {
            GameResult::Win(stake.saturating_mul(payout_multiplier(target)))
        } else {
            GameResult::Loss
        };
        (spin, result)
    }

    pub fn target(&self) -> RouletteTarget {
        self.target
    }

    pub fn pocket(&self) -> usize {
        self.pocket
    }

    pub fn number(&self) -> u8 {
        WHEEL[self.pocket]
    }

    pub fn color(&self) -> PocketColor {
        color_of(self.pocket)
    }
}

impl CasinoGame for RouletteSpin {
    fn process_move(&mut self, _: u64, _: PlayerInput) -> Result<GameResult, InvalidCommand> {
        // Resolved at spin time.
        Err(InvalidCommand::NotActive)
    }

    fn multiplier(&self) -> f64 {
        if bet_wins(self.target, self.pocket) {
            payout_multiplier(self.target) as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedDraws;

    fn draw_for(number: u8) -> f64 {
        let index = WHEEL.iter().position(|n| *n == number).unwrap();
        (index as f64 + 0.5) / ROULETTE_POCKETS as f64
    }

    #[test]
    fn wheel_holds_every_number_once() {
        let mut seen = [false; ROULETTE_POCKETS];
        for number in WHEEL {
            assert!(!seen[number as usize]);
            seen[number as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn colors_alternate_around_the_wheel() {
        assert_eq!(color_of(0), PocketColor::Green);
        // 32 sits at index 1, 15 at index 2.
        assert_eq!(color_of(1), PocketColor::Black);
        assert_eq!(color_of(2), PocketColor::Red);
        assert_eq!(color_of(36), PocketColor::Red);
        let reds = (0..ROULETTE_POCKETS)
            .filter(|p| color_of(*p) == PocketColor::Red)
            .count();
        let blacks = (0..ROULETTE_POCKETS)
            .filter(|p| color_of(*p) == PocketColor::Black)
            .count();
        assert_eq!((reds, blacks), (18, 18));
    }

    #[test]
    fn spin_maps_draw_to_wheel_order() {
        let mut draws = FixedDraws::new([0.0, 0.999_999]);
        assert_eq!(spin_pocket(&mut draws), 0);
        assert_eq!(spin_pocket(&mut draws), 36);
        assert_eq!(WHEEL[36], 26);
    }

    #[test]
    fn red_bet_wins_and_loses() {
        let mut draws = FixedDraws::new([draw_for(15)]);
        let (spin, result) = RouletteSpin::spin(RouletteTarget::Red, 10, &mut draws);
        assert_eq!(spin.pocket(), 2);
        assert_eq!(spin.color(), PocketColor::Red);
        assert_eq!(result, GameResult::Win(20));

        let mut draws = FixedDraws::new([draw_for(32)]);
        let (spin, result) = RouletteSpin::spin(RouletteTarget::Red, 10, &mut draws);
        assert_eq!(spin.color(), PocketColor::Black);
        assert_eq!(result, GameResult::Loss);
        let (_, result) = RouletteSpin::spin(RouletteTarget::Black, 10, &mut draws);
        assert_eq!(result, GameResult::Win(20));
    }

    #[test]
    fn zero_pays_green_and_straight_only() {
        let mut draws = FixedDraws::new([draw_for(0)]);
        let (_, result) = RouletteSpin::spin(RouletteTarget::Green, 10, &mut draws);
        assert_eq!(result, GameResult::Win(140));
        let (_, result) = RouletteSpin::spin(RouletteTarget::Number(0), 10, &mut draws);
        assert_eq!(result, GameResult::Win(360));
        let (_, result) = RouletteSpin::spin(RouletteTarget::Black, 10, &mut draws);
        assert_eq!(result, GameResult::Loss);
        let (_, result) = RouletteSpin::spin(RouletteTarget::Red, 10, &mut draws);
        assert_eq!(result, GameResult::Loss);
    }

    #[test]
    fn straight_number_pays_36x() {
        let mut draws = FixedDraws::new([draw_for(17)]);
        let (mut spin, result) = RouletteSpin::spin(RouletteTarget::Number(17), 5, &mut draws);
        assert_eq!(result, GameResult::Win(180));
        assert_eq!(spin.multiplier(), 36.0);
        assert_eq!(
            spin.process_move(5, PlayerInput::CashOut),
            Err(InvalidCommand::NotActive)
        );
    }
}
