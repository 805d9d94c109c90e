//! Simulation output: the diagnostic time series plus position snapshots.

use periwalk_core::{DiagnosticRecord, Position};
use serde::{Deserialize, Serialize};

/// Result of one driver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One record per step, strictly increasing in `step`, starting at 0
    pub diagnostics: Vec<DiagnosticRecord>,

    /// Positions before the first step
    pub initial_positions: Vec<Position>,

    /// Positions after the last step
    pub final_positions: Vec<Position>,
}

impl SimulationResult {
    /// Number of records (equals the configured `number_steps`).
    pub fn number_steps(&self) -> usize {
        self.diagnostics.len()
    }

    /// The last diagnostic record.
    pub fn final_record(&self) -> Option<&DiagnosticRecord> {
        self.diagnostics.last()
    }

    /// Moment of inertia at the last step (0 for an empty series).
    pub fn final_moment_of_inertia(&self) -> f64 {
        self.final_record().map_or(0.0, |r| r.moment_of_inertia)
    }

    /// Change in moment of inertia between the first and last record.
    ///
    /// For particles starting at one point this is the spread the walk
    /// built up, until the periodic box saturates it.
    pub fn inertia_growth(&self) -> f64 {
        match (self.diagnostics.first(), self.diagnostics.last()) {
            (Some(first), Some(last)) => last.moment_of_inertia - first.moment_of_inertia,
            _ => 0.0,
        }
    }

    /// True if the records are numbered `0, 1, 2, ...` with no gaps.
    pub fn is_contiguous(&self) -> bool {
        self.diagnostics
            .iter()
            .enumerate()
            .all(|(i, r)| r.step == i as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: u64, moment_of_inertia: f64) -> DiagnosticRecord {
        DiagnosticRecord {
            step,
            center_of_mass_x: 1.0,
            center_of_mass_y: 2.0,
            moment_of_inertia,
        }
    }

    #[test]
    fn test_summary_helpers() {
        let result = SimulationResult {
            diagnostics: vec![record(0, 0.0), record(1, 0.5), record(2, 1.25)],
            initial_positions: vec![Position::new(0.0, 0.0)],
            final_positions: vec![Position::new(1.0, 1.0)],
        };

        assert_eq!(result.number_steps(), 3);
        assert_eq!(result.final_record().map(|r| r.step), Some(2));
        assert_eq!(result.final_moment_of_inertia(), 1.25);
        assert_eq!(result.inertia_growth(), 1.25);
        assert!(result.is_contiguous());
    }

    #[test]
    fn test_gap_is_not_contiguous() {
        let result = SimulationResult {
            diagnostics: vec![record(0, 0.0), record(2, 0.5)],
            initial_positions: vec![],
            final_positions: vec![],
        };

        assert!(!result.is_contiguous());
    }

    #[test]
    fn test_empty_series() {
        let result = SimulationResult {
            diagnostics: vec![],
            initial_positions: vec![],
            final_positions: vec![],
        };

        assert_eq!(result.final_moment_of_inertia(), 0.0);
        assert_eq!(result.inertia_growth(), 0.0);
        assert!(result.is_contiguous());
    }
}
