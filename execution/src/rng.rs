//! Random draw sources.
//!
//! Every outcome generator consumes uniform draws in `[0, 1)` through [`DrawSource`], so the same
//! generator can be driven by OS entropy in play, a hash chain in simulations, or a scripted list
//! in tests.

use commonware_cryptography::{sha256::Sha256, Hasher};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait DrawSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, n)`. Returns 0 when `n == 0`.
    fn next_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let index = (self.next_unit() * n as f64) as usize;
        index.min(n - 1)
    }

    /// `true` with probability `p`.
    fn next_bool(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Deterministic random number generator.
///
/// Uses SHA256 hash chains seeded from `(seed, session_id, move_number)` so that a replay with the
/// same inputs reproduces every draw.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a seed, session ID, and move number.
    pub fn new(seed: u64, session_id: u64, move_number: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&seed.to_be_bytes());
        hasher.update(&session_id.to_be_bytes());
        hasher.update(&move_number.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    /// Get a random u64 value.
    pub fn next_u64(&mut self) -> u64 {
        (0..8).fold(0u64, |acc, _| (acc << 8) | self.next_byte() as u64)
    }
}

impl DrawSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        // 53 bits fill the f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Draws backed by [`StdRng`].
pub struct EntropyDraws {
    rng: StdRng,
}

impl EntropyDraws {
    /// Seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded from a fixed value, for replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for EntropyDraws {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[cfg(any(test, feature = "mocks"))]
#[derive(Clone, Debug)]
pub struct FixedDraws {
    draws: Vec<f64>,
    next: usize,
}

#[cfg(any(test, feature = "mocks"))]
impl FixedDraws {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "FixedDraws needs at least one draw");
        Self { draws, next: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

#[cfg(any(test, feature = "mocks"))]
impl DrawSource for FixedDraws {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}
