//! Replay source: hands back a fixed list of draws.

use crate::NormalSource;

/// Source that cycles through a fixed list of values.
///
/// Useful when a test needs to know the exact displacement applied by a step.
/// An empty list replays zeros.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a replay source over `values`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Creates a source that only ever returns `0.0`.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Total number of values handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl NormalSource for ReplaySource {
    fn draw_normal(&mut self, count: usize) -> Vec<f64> {
        let out = if self.values.is_empty() {
            vec![0.0; count]
        } else {
            (0..count)
                .map(|i| self.values[(self.cursor + i) % self.values.len()])
                .collect()
        };
        self.cursor += count;
        out
    }

    fn seed(&self) -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_cycles_across_calls() {
        let mut source = ReplaySource::new(vec![0.5, -0.5, 2.0]);

        assert_eq!(source.draw_normal(2), vec![0.5, -0.5]);
        assert_eq!(source.draw_normal(4), vec![2.0, 0.5, -0.5, 2.0]);
        assert_eq!(source.drawn(), 6);
    }

    #[test]
    fn test_empty_replay_yields_zeros() {
        let mut source = ReplaySource::zeros();
        assert_eq!(source.draw_normal(3), vec![0.0, 0.0, 0.0]);
    }
}
