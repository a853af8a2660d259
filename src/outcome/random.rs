//! Injected source of uniform random draws
//!
//! Everything random in a simulation (placings, fallback picks, seat
//! shuffles) goes through [`RandomSource`], so a run can be replayed from a
//! seed or scripted draw by draw in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in [0, 1)
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index on an empty range");
    let index = (rng.next_unit() * len as f64) as usize;
    index.min(len.saturating_sub(1))
}

/// Fisher-Yates shuffle, swapping from the back of the slice towards the front
pub fn shuffle<R: RandomSource + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    let mut remaining = items.len();
    while remaining > 0 {
        let pick = pick_index(rng, remaining);
        remaining -= 1;
        items.swap(remaining, pick);
    }
}

/// [`RandomSource`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, starting over when it runs out
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
