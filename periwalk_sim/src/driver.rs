//! Simulation driver - runs advance/diagnose cycles and assembles the result.
//!
//! A run moves through three phases:
//!
//! ```text
//! Setup ──► Running(step = 1 .. number_steps-1) ──► Done
//! ```
//!
//! - **Setup**: validate the config, build the domain and ensemble, capture
//!   the initial snapshot and the step-0 record
//! - **Running**: `advance()` then `diagnostics()`, appended in step order
//! - **Done**: capture the final snapshot and hand back the result
//!
//! Every validation happens in Setup, so a run either completes all steps
//! or fails before the first `advance()`.

use crate::config::WalkConfig;
use crate::result::SimulationResult;

use periwalk_core::{ParticleEnsemble, PeriodicDomain, Result};
use periwalk_env::{NormalSource, SeededSource};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one simulation with explicit parameters and an injected source.
///
/// Particles start at the center of the box.
///
/// # Errors
/// `WalkError::Validation` for non-positive extents, zero particles, zero
/// steps, or a step length that is negative, non-finite or above
/// [`MAX_STEP_LENGTH`](periwalk_core::MAX_STEP_LENGTH). Nothing is
/// constructed in that case.
pub fn run<S: NormalSource>(
    length_x: f64,
    length_y: f64,
    particle_count: usize,
    number_steps: usize,
    step_length: f64,
    source: S,
) -> Result<SimulationResult> {
    let config = WalkConfig {
        length_x,
        length_y,
        particle_count,
        number_steps,
        step_length,
        seed: source.seed().unwrap_or_default(),
    };
    SimulationDriver::new(config).run_with_source(source)
}

/// Drives a single ensemble through a fixed number of steps.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    /// Run parameters
    config: WalkConfig,

    /// Explicit initial positions (default: all at the box center)
    initial_positions: Option<(Vec<f64>, Vec<f64>)>,

    /// Pre-built domain to share with other runs
    domain: Option<Arc<PeriodicDomain>>,
}

impl SimulationDriver {
    /// Creates a new driver.
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            initial_positions: None,
            domain: None,
        }
    }

    /// Starts the particles at explicit positions instead of the center.
    ///
    /// Both sequences must hold exactly `particle_count` values.
    pub fn with_initial_positions(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.initial_positions = Some((x, y));
        self
    }

    /// Reuses an existing domain. Its extents replace the config's.
    pub fn with_domain(mut self, domain: Arc<PeriodicDomain>) -> Self {
        self.config.length_x = domain.length_x();
        self.config.length_y = domain.length_y();
        self.domain = Some(domain);
        self
    }

    /// The configuration this driver runs.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Runs with a `SeededSource` built from `config.seed`.
    pub fn run(&self) -> Result<SimulationResult> {
        self.run_with_source(SeededSource::new(self.config.seed))
    }

    /// Runs with the given draw source.
    pub fn run_with_source<S: NormalSource>(&self, source: S) -> Result<SimulationResult> {
        let config = &self.config;

        // Setup
        config.validate()?;
        let domain = match &self.domain {
            Some(domain) => Arc::clone(domain),
            None => Arc::new(config.domain()?),
        };
        let mut ensemble = match &self.initial_positions {
            Some((x, y)) => ParticleEnsemble::with_particle_count(
                domain,
                source,
                config.particle_count,
                x.clone(),
                y.clone(),
                config.step_length,
            )?,
            None => ParticleEnsemble::centered(
                domain,
                source,
                config.particle_count,
                config.step_length,
            )?,
        };
        debug!(
            "setup: {}x{} box, {} particles, {} steps, step_length={}, seed={:?}",
            config.length_x,
            config.length_y,
            config.particle_count,
            config.number_steps,
            config.step_length,
            ensemble.source().seed()
        );

        let initial_positions = ensemble.positions();
        let mut diagnostics = Vec::with_capacity(config.number_steps);
        diagnostics.push(ensemble.diagnostics());

        // Running
        for _ in 1..config.number_steps {
            ensemble.advance();
            diagnostics.push(ensemble.diagnostics());
        }
        debug!("running: completed {} steps", ensemble.steps_done());

        // Done
        let final_positions = ensemble.positions();
        let result = SimulationResult {
            diagnostics,
            initial_positions,
            final_positions,
        };

        info!(
            "run complete: {} records, final moment of inertia {:.4}",
            result.number_steps(),
            result.final_moment_of_inertia()
        );

        Ok(result)
    }
}
