//! Random sources for board generation and cascade draws
//!
//! Every random choice in a round goes through [`RandomSource::next`], one
//! call per choice, in a fixed order. Replaying a seed replays the round.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Uniform integer source consumed by the modes
pub trait RandomSource {
    /// Uniform draw in `[0, bound)`. `bound` must be non-zero.
    fn next(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self, bound: usize) -> usize {
        (**self).next(bound)
    }
}

/// ChaCha8-backed game RNG
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    draws: u64,
}

impl GameRng {
    /// Reproducible RNG from a seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// RNG seeded from the OS
    pub fn from_os() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
            draws: 0,
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_os(),
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for GameRng {
    fn next(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "random draw with empty range");
        self.draws += 1;
        self.rng.random_range(0..bound)
    }
}
