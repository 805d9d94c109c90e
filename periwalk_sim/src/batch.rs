//! Batch runner - one configuration over many seeds, with invariant checks.

use crate::config::WalkConfig;
use crate::driver::SimulationDriver;
use crate::result::SimulationResult;

use periwalk_core::{PeriodicDomain, Result};
use periwalk_env::{NormalSource, SeededSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one seeded run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Seed used
    pub seed: u64,

    /// Whether every invariant check passed
    pub passed: bool,

    /// Failure message if any
    pub failure_reason: Option<String>,

    /// Records produced
    pub total_steps: usize,

    /// Center of mass at the last step
    pub final_center_of_mass: (f64, f64),

    /// Moment of inertia at the last step
    pub final_moment_of_inertia: f64,

    /// Final minus initial moment of inertia
    pub inertia_growth: f64,
}

impl RunSummary {
    /// Summarizes a finished run and checks it against its configuration.
    pub fn from_result(
        seed: u64,
        config: &WalkConfig,
        domain: &PeriodicDomain,
        result: &SimulationResult,
    ) -> Self {
        let failure_reason = check_result(config, domain, result);
        let final_center_of_mass = result
            .final_record()
            .map_or((f64::NAN, f64::NAN), |r| r.center_of_mass());

        Self {
            seed,
            passed: failure_reason.is_none(),
            failure_reason,
            total_steps: result.number_steps(),
            final_center_of_mass,
            final_moment_of_inertia: result.final_moment_of_inertia(),
            inertia_growth: result.inertia_growth(),
        }
    }
}

/// Checks a result against the engine's invariants.
///
/// Returns the first violation found, or `None` if the run is sound:
/// - exactly `number_steps` records, numbered `0, 1, 2, ...`
/// - both snapshots hold `particle_count` positions inside the box
/// - every moment of inertia is finite and non-negative
pub fn check_result(
    config: &WalkConfig,
    domain: &PeriodicDomain,
    result: &SimulationResult,
) -> Option<String> {
    if result.number_steps() != config.number_steps {
        return Some(format!(
            "expected {} records, got {}",
            config.number_steps,
            result.number_steps()
        ));
    }
    if !result.is_contiguous() {
        return Some("diagnostic steps are not 0, 1, 2, ...".to_string());
    }

    for (label, snapshot) in [
        ("initial", &result.initial_positions),
        ("final", &result.final_positions),
    ] {
        if snapshot.len() != config.particle_count {
            return Some(format!(
                "{} snapshot has {} positions, expected {}",
                label,
                snapshot.len(),
                config.particle_count
            ));
        }
        if let Some(p) = snapshot.iter().find(|p| !domain.contains(p.x, p.y)) {
            return Some(format!(
                "{} position ({}, {}) outside the box",
                label, p.x, p.y
            ));
        }
    }

    if let Some(r) = result
        .diagnostics
        .iter()
        .find(|r| !(r.moment_of_inertia.is_finite() && r.moment_of_inertia >= 0.0))
    {
        return Some(format!(
            "moment of inertia {} at step {} is invalid",
            r.moment_of_inertia, r.step
        ));
    }

    None
}

/// Runs one configuration across a family of seeds.
///
/// The first run uses the configured seed. Run `k > 0` uses
/// `SeededSource::new(seed).derive(k)`, and its summary records the derived
/// seed, so any run of a batch can be replayed on its own with that seed.
/// All runs share a single `Arc<PeriodicDomain>` and never share generator
/// state.
pub struct BatchRunner {
    /// Base configuration (its seed is the root seed)
    config: WalkConfig,

    /// Number of seeds to run
    seeds: usize,
}

impl BatchRunner {
    /// Creates a runner for a single seed.
    pub fn new(config: WalkConfig) -> Self {
        Self { config, seeds: 1 }
    }

    /// Sets how many seeds to run.
    pub fn with_seeds(mut self, seeds: usize) -> Self {
        self.seeds = seeds;
        self
    }

    /// Runs every seed and returns one summary per seed, in seed order.
    ///
    /// # Errors
    /// Validation errors from the configuration, raised before any run starts.
    pub fn run(&self) -> Result<Vec<RunSummary>> {
        self.config.validate()?;
        let domain = Arc::new(self.config.domain()?);

        info!(
            "Starting batch: {} seed(s) from {}",
            self.seeds, self.config.seed
        );

        let root = SeededSource::new(self.config.seed);
        let mut summaries = Vec::with_capacity(self.seeds);
        for stream in 0..self.seeds as u64 {
            let source = match stream {
                0 => root.clone(),
                k => root.derive(k),
            };
            let seed = source.seed().unwrap_or(self.config.seed);
            let config = self.config.clone().with_seed(seed);

            let result = SimulationDriver::new(config.clone())
                .with_domain(Arc::clone(&domain))
                .run_with_source(source)?;

            let summary = RunSummary::from_result(seed, &config, &domain, &result);
            match &summary.failure_reason {
                Some(reason) => warn!("seed={} failed check: {}", seed, reason),
                None => debug!(
                    "seed={} ok: inertia {:.4}",
                    seed, summary.final_moment_of_inertia
                ),
            }
            summaries.push(summary);
        }

        Ok(summaries)
    }
}
