//! Random draws used by the controller, and sampling without replacement until a pool is exhausted.

use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the two kinds of draw a cycle needs.
pub trait Randomness: Send {
    /// Fair coin.
    fn coin(&mut self) -> bool;
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

pub struct RngRandomness<R> {
    rng: R,
}

impl<R> RngRandomness<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomness<StdRng> {
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> Randomness for RngRandomness<R> {
    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Draws indices into a pool of `len` items, never repeating one until every index has been used.
#[derive(Debug, Clone)]
pub struct NoRepeatSampler {
    len: usize,
    used: HashSet<usize>,
}

impl NoRepeatSampler {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            used: HashSet::with_capacity(len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_exhausted(&self) -> bool {
        self.used.len() >= self.len
    }

    /// Returns `None` only for an empty pool.
    pub fn draw(&mut self, randomness: &mut dyn Randomness) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let exhausted = self.is_exhausted();
        let mut idx = randomness.index(self.len);
        while !exhausted && self.used.contains(&idx) {
            idx = randomness.index(self.len);
        }
        self.used.insert(idx);
        Some(idx)
    }
}

#[cfg(test)]
#[path = "tests/sampler_tests.rs"]
mod tests;
