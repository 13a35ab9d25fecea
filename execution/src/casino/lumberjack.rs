//! Lumberjack: chop a tree from either side while dodging branches.
//!
//! The tree is a queue of segments; the bottom one may carry a branch on either side. Chopping on
//! the branch side ends the session. Every other chop earns `0.1 × combo`, grows the combo, and
//! shifts the tree down with a freshly drawn top segment. The combo drains by 0.15 every 150 ms
//! once chopping has started.

use kazik_types::{
    casino::{FARMING_COMBO_STEP, FARMING_MAX_COMBO},
    Side,
};
use std::collections::VecDeque;

use super::InvalidCommand;
use crate::rng::DrawSource;

pub const TREE_HEIGHT: usize = 10;
pub const BASE_REWARD: f64 = 0.1;
pub const COMBO_DECAY: f64 = 0.15;
pub const DECAY_INTERVAL_MS: u64 = 150;

/// Branch for the segment above `last`. Never two branches in a row.
pub fn next_branch<D: DrawSource + ?Sized>(last: Option<Side>, draws: &mut D) -> Option<Side> {
    if last.is_some() {
        return None;
    }
    let r = draws.next_unit();
    if r < 0.4 {
        Some(Side::Left)
    } else if r < 0.8 {
        Some(Side::Right)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct Lumberjack {
    tree: VecDeque<Option<Side>>,
    player: Side,
    combo: f64,
    score: f64,
    chops: u32,
    decay_ms: u64,
    playing: bool,
    over: bool,
}

impl Default for Lumberjack {
    fn default() -> Self {
        Self::new()
    }
}

impl Lumberjack {
    pub fn new() -> Self {
        Self {
            tree: std::iter::repeat(None).take(TREE_HEIGHT).collect(),
            player: Side::Left,
            combo: 1.0,
            score: 0.0,
            chops: 0,
            decay_ms: 0,
            playing: false,
            over: false,
        }
    }

    /// Segments bottom first.
    pub fn tree(&self) -> impl Iterator<Item = Option<Side>> + '_ {
        self.tree.iter().copied()
    }

    pub fn player(&self) -> Side {
        self.player
    }

    pub fn combo(&self) -> f64 {
        self.combo
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn chops(&self) -> u32 {
        self.chops
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Drain the combo for `elapsed_ms` of play.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if !self.playing || self.over {
            return;
        }
        self.decay_ms = self.decay_ms.saturating_add(elapsed_ms);
        while self.decay_ms >= DECAY_INTERVAL_MS {
            self.decay_ms -= DECAY_INTERVAL_MS;
            self.combo = (self.combo - COMBO_DECAY).max(1.0);
        }
    }

    /// Chop from `side`. Returns `true` if the chop hit a branch and ended the session.
    pub fn chop<D: DrawSource + ?Sized>(
        &mut self,
        side: Side,
        draws: &mut D,
    ) -> Result<bool, InvalidCommand> {
        if self.over {
            return Err(InvalidCommand::NotActive);
        }
        self.playing = true;
        self.player = side;
        if self.tree.front().copied().flatten() == Some(side) {
            self.over = true;
            return Ok(true);
        }
        self.score += BASE_REWARD * self.combo;
        self.combo = (self.combo + FARMING_COMBO_STEP).min(FARMING_MAX_COMBO);
        self.chops += 1;
        self.tree.pop_front();
        let last = self.tree.back().copied().flatten();
        self.tree.push_back(next_branch(last, draws));
        Ok(false)
    }

    pub fn quit(&mut self) {
        self.over = true;
    }
}
