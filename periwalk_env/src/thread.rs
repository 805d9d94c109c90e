//! Production implementation of NormalSource using the thread-local RNG.

use crate::NormalSource;
use rand::rngs::ThreadRng;
use rand_distr::{Distribution, StandardNormal};

/// Production source backed by OS entropy.
///
/// This is the "real" implementation for exploratory runs where
/// reproducibility does not matter. Draws come from `rand::thread_rng()`.
#[derive(Debug, Clone, Default)]
pub struct ThreadSource {
    rng: ThreadRng,
}

impl ThreadSource {
    /// Creates a new ThreadSource.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl NormalSource for ThreadSource {
    fn draw_normal(&mut self, count: usize) -> Vec<f64> {
        StandardNormal
            .sample_iter(&mut self.rng)
            .take(count)
            .collect()
    }

    fn seed(&self) -> Option<u64> {
        // Not seeded
        None
    }
}
