//! Keepie-uppie: keep a ball in the air by tapping it.
//!
//! Physics run in 60 Hz frames driven by [`KeepieUppie::tick`]. Each tap kicks the ball upward and
//! earns `0.5 × combo`; taps less than 600 ms apart grow the combo. The session ends when the
//! ball reaches the floor.

use kazik_types::casino::{FARMING_COMBO_STEP, FARMING_MAX_COMBO};

use super::InvalidCommand;

pub const FRAMES_PER_SECOND: u64 = 60;
pub const GRAVITY: f64 = 0.5;
pub const JUMP_VELOCITY: f64 = -12.0;
pub const FIELD_HEIGHT: f64 = 400.0;
pub const BALL_SIZE: f64 = 60.0;
pub const FLOOR: f64 = FIELD_HEIGHT - BALL_SIZE;
pub const START_VELOCITY: f64 = -5.0;
pub const REWARD_PER_TAP: f64 = 0.5;
pub const COMBO_WINDOW_MS: u64 = 600;

#[derive(Clone, Debug)]
pub struct KeepieUppie {
    y: f64,
    velocity: f64,
    combo: f64,
    total: f64,
    clock_ms: u64,
    frames: u64,
    last_tap_ms: Option<u64>,
    taps: u32,
    over: bool,
}

impl Default for KeepieUppie {
    fn default() -> Self {
        Self::new()
    }
}

impl KeepieUppie {
    pub fn new() -> Self {
        Self {
            y: FIELD_HEIGHT / 2.0,
            velocity: START_VELOCITY,
            combo: 1.0,
            total: 0.0,
            clock_ms: 0,
            frames: 0,
            last_tap_ms: None,
            taps: 0,
            over: false,
        }
    }

    /// Ball height from the top of the field.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn combo(&self) -> f64 {
        self.combo
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn taps(&self) -> u32 {
        self.taps
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Run the physics frames due after `elapsed_ms`. Returns `true` if the ball hit the floor.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if self.over {
            return false;
        }
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        let due = self.clock_ms.saturating_mul(FRAMES_PER_SECOND) / 1000;
        while self.frames < due {
            self.frames += 1;
            self.velocity += GRAVITY;
            self.y += self.velocity;
            if self.y >= FLOOR {
                self.y = FLOOR;
                self.over = true;
                return true;
            }
        }
        false
    }

    /// Kick the ball. Returns the amount earned by this tap.
    pub fn tap(&mut self) -> Result<f64, InvalidCommand> {
        if self.over {
            return Err(InvalidCommand::NotActive);
        }
        self.combo = match self.last_tap_ms {
            Some(last) if self.clock_ms - last < COMBO_WINDOW_MS => {
                (self.combo + FARMING_COMBO_STEP).min(FARMING_MAX_COMBO)
            }
            _ => 1.0,
        };
        self.last_tap_ms = Some(self.clock_ms);
        self.velocity = JUMP_VELOCITY;
        self.taps += 1;
        let earned = REWARD_PER_TAP * self.combo;
        self.total += earned;
        Ok(earned)
    }

    pub fn quit(&mut self) {
        self.over = true;
    }
}
