//! Seeded pseudo-random stream shared by every generation step.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Deterministic random stream. Every draw is a pure function of the seed and the
/// draws made before it, so the order of calls is part of the reproducibility contract.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one `u64` draw.
    pub fn next_f64(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// One Bernoulli trial with success probability `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// # Panics
    /// Panics when `bound` is zero.
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "cannot draw from an empty range");
        ((u128::from(self.rng.next_u64()) * bound as u128) >> 64) as usize
    }

    /// Uniform pick from a non-empty slice.
    ///
    /// # Panics
    /// Panics when `items` is empty. Callers must skip empty floors before choosing.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot choose from an empty sequence");
        &items[self.below(items.len())]
    }
}
