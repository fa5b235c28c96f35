//! The one source of randomness in a match.
//!
//! Deck shuffling and turn-order permutation both go through
//! [`GameRng::shuffle`], a uniform Fisher-Yates shuffle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: StdRng,
}

impl GameRng {
    /// Deterministic RNG, for tests and replays.
    pub fn new(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    /// RNG seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self { inner: StdRng::from_os_rng() }
    }

    /// Shuffle a slice in place; every permutation is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
