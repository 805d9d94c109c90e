//! Core random-draw trait consumed by the ensemble.

/// The central interface for drawing Gaussian noise.
///
/// This trait abstracts the generator so the ensemble update rule can run
/// against a reproducible stream in tests and an entropy-backed stream in
/// production.
///
/// # Implementations
///
/// - **Simulation**: `SeededSource` - `ChaCha8Rng(seed)`
/// - **Production**: `ThreadSource` - wraps `rand::thread_rng()`
/// - **Tests**: `ReplaySource` - replays a fixed list of values
///
/// # Exclusivity
///
/// Draws take `&mut self`: a source carries generator state and must be
/// owned by (or lent to) exactly one ensemble at a time. Interleaving draws
/// from two ensembles would make both sequences depend on scheduling.
pub trait NormalSource {
    /// Returns `count` independent standard-normal samples (mean 0, std 1).
    ///
    /// The returned vector always has length `count`; `count == 0` yields an
    /// empty vector without advancing the generator.
    fn draw_normal(&mut self, count: usize) -> Vec<f64>;

    /// Returns the seed this source was built from (for logging/replay).
    ///
    /// Reproducible sources return `Some(seed)`; entropy-backed ones `None`.
    fn seed(&self) -> Option<u64>;
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    fn draw_normal(&mut self, count: usize) -> Vec<f64> {
        (**self).draw_normal(count)
    }

    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

impl<S: NormalSource + ?Sized> NormalSource for Box<S> {
    fn draw_normal(&mut self, count: usize) -> Vec<f64> {
        (**self).draw_normal(count)
    }

    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReplaySource, SeededSource};

    fn draw_through<S: NormalSource>(mut source: S, count: usize) -> Vec<f64> {
        source.draw_normal(count)
    }

    #[test]
    fn test_borrowed_source_advances_owner() {
        let mut owned = SeededSource::new(7);
        let mut reference = SeededSource::new(7);

        let first = draw_through(&mut owned, 4);
        assert_eq!(first, reference.draw_normal(4));

        // The borrow advanced the owner's stream
        assert_eq!(owned.draw_normal(4), reference.draw_normal(4));
    }

    #[test]
    fn test_boxed_dyn_source() {
        let boxed: Box<dyn NormalSource> = Box::new(ReplaySource::new(vec![1.0, -1.0]));
        assert_eq!(boxed.seed(), None);
        assert_eq!(draw_through(boxed, 3), vec![1.0, -1.0, 1.0]);
    }
}
