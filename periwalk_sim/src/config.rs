//! Run configuration.

use periwalk_core::{validate_step_length, PeriodicDomain, Result, WalkError};
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
///
/// A plain value: every run builds its own domain and draw source from it,
/// so no state leaks from one run into the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Box extent along x
    pub length_x: f64,

    /// Box extent along y
    pub length_y: f64,

    /// Number of particles
    pub particle_count: usize,

    /// Number of diagnostic records (the initial state counts as step 0)
    pub number_steps: usize,

    /// Standard deviation of each per-axis Gaussian step, at most
    /// [`MAX_STEP_LENGTH`](periwalk_core::MAX_STEP_LENGTH)
    pub step_length: f64,

    /// Master seed for the draw source
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            length_x: 10.0,
            length_y: 20.0,
            particle_count: 100,
            number_steps: 100,
            step_length: 0.5,
            seed: 42,
        }
    }
}

impl WalkConfig {
    /// Returns a copy with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter without building any state.
    ///
    /// `step_length` must be finite, non-negative and no larger than
    /// [`MAX_STEP_LENGTH`](periwalk_core::MAX_STEP_LENGTH), the same bound
    /// the ensemble enforces.
    pub fn validate(&self) -> Result<()> {
        self.domain()?;
        if self.particle_count == 0 {
            return Err(WalkError::validation("particle_count must be > 0"));
        }
        if self.number_steps == 0 {
            return Err(WalkError::validation("number_steps must be >= 1"));
        }
        validate_step_length(self.step_length)
    }

    /// Builds the periodic box described by this config.
    pub fn domain(&self) -> Result<PeriodicDomain> {
        PeriodicDomain::new(self.length_x, self.length_y)
    }
}
