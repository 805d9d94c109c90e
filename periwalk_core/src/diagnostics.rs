//! Value types produced by the ensemble: per-step diagnostics and position snapshots.

use serde::{Deserialize, Serialize};

/// Summary statistics of the ensemble at one step.
///
/// Produced fresh by every diagnostic query and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Number of completed `advance()` calls when the record was taken
    pub step: u64,

    /// Mean x position
    pub center_of_mass_x: f64,

    /// Mean y position
    pub center_of_mass_y: f64,

    /// Sum of the population variances of x and y
    pub moment_of_inertia: f64,
}

impl DiagnosticRecord {
    /// Center of mass as a pair.
    pub fn center_of_mass(&self) -> (f64, f64) {
        (self.center_of_mass_x, self.center_of_mass_y)
    }
}

/// Position of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (f64, f64) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}
