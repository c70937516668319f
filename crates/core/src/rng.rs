//! RNG module - random spawn decisions
//!
//! Wraps a seedable [`StdRng`] with the handful of helpers the spawn rules
//! need: bounded integers, uniform picks from a slice and coin flips.
//! Seeding makes a whole swarm reproducible, which the tests rely on.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random source for layer spawning and palette picks
#[derive(Debug, Clone)]
pub struct SpawnRng {
    inner: StdRng,
}

impl SpawnRng {
    /// Create an RNG seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic RNG
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Deterministic when `seed` is set, entropy-seeded otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform value in `[0, n)`; 0 when the range is empty
    pub fn below(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        self.inner.gen_range(0..n)
    }

    /// Uniform pick from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Uniform copy from a non-empty slice, `fallback` otherwise
    pub fn pick<T: Copy>(&mut self, items: &[T], fallback: T) -> T {
        self.choose(items).copied().unwrap_or(fallback)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }
}
