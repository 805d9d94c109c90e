//! Particle ensemble: the evolving random-walk state.
//!
//! Positions live in two index-aligned `DVector`s so each step is a pair of
//! vectorized `axpy` updates followed by an in-place periodic wrap.

use crate::diagnostics::{DiagnosticRecord, Position};
use crate::domain::PeriodicDomain;
use crate::error::{Result, WalkError};
use nalgebra::DVector;
use periwalk_env::NormalSource;
use std::sync::Arc;

/// N point particles performing a Gaussian random walk in a periodic box.
///
/// The ensemble shares its [`PeriodicDomain`] (read-only) and exclusively owns
/// its [`NormalSource`]. After construction and after every [`advance`]
/// every `x[i]` lies in `[0, length_x)` and every `y[i]` in `[0, length_y)`.
///
/// A zero-particle ensemble cannot be built, so the diagnostic queries are
/// always well defined.
///
/// [`advance`]: ParticleEnsemble::advance
#[derive(Debug)]
pub struct ParticleEnsemble<S: NormalSource> {
    /// Shared periodic box
    domain: Arc<PeriodicDomain>,

    /// Injected draw source (exclusively owned)
    source: S,

    /// x coordinates
    x: DVector<f64>,

    /// y coordinates, index-aligned with `x`
    y: DVector<f64>,

    /// Standard deviation of the per-step displacement along each axis
    step_length: f64,

    /// Number of completed `advance()` calls
    steps_done: u64,
}

impl<S: NormalSource> ParticleEnsemble<S> {
    /// Creates an ensemble from explicit initial positions.
    ///
    /// Positions outside the box are wrapped into it.
    ///
    /// # Errors
    /// - `ShapeMismatch` if `x` and `y` differ in length
    /// - `Validation` if there are no particles, a position is non-finite,
    ///   or `step_length` is negative, non-finite or above [`MAX_STEP_LENGTH`]
    pub fn new(
        domain: Arc<PeriodicDomain>,
        source: S,
        x: Vec<f64>,
        y: Vec<f64>,
        step_length: f64,
    ) -> Result<Self> {
        if x.len() != y.len() {
            return Err(WalkError::shape(x.len(), y.len(), x.len()));
        }
        if x.is_empty() {
            return Err(WalkError::validation("ensemble needs at least one particle"));
        }
        validate_step_length(step_length)?;
        if let Some(bad) = x.iter().chain(y.iter()).find(|v| !v.is_finite()) {
            return Err(WalkError::validation(format!(
                "initial positions must be finite, got {}",
                bad
            )));
        }

        let (x, y) = domain.normalize(&x, &y)?;

        Ok(Self {
            domain,
            source,
            x: DVector::from_vec(x),
            y: DVector::from_vec(y),
            step_length,
            steps_done: 0,
        })
    }

    /// Like [`new`](Self::new), but also checks both sequences hold exactly
    /// `particle_count` values.
    pub fn with_particle_count(
        domain: Arc<PeriodicDomain>,
        source: S,
        particle_count: usize,
        x: Vec<f64>,
        y: Vec<f64>,
        step_length: f64,
    ) -> Result<Self> {
        if particle_count == 0 {
            return Err(WalkError::validation("particle_count must be > 0"));
        }
        if x.len() != particle_count || y.len() != particle_count {
            return Err(WalkError::shape(x.len(), y.len(), particle_count));
        }
        Self::new(domain, source, x, y, step_length)
    }

    /// Creates an ensemble with every particle at the center of the box.
    pub fn centered(
        domain: Arc<PeriodicDomain>,
        source: S,
        particle_count: usize,
        step_length: f64,
    ) -> Result<Self> {
        let (cx, cy) = domain.center();
        Self::with_particle_count(
            domain,
            source,
            particle_count,
            vec![cx; particle_count],
            vec![cy; particle_count],
            step_length,
        )
    }

    /// Advances every particle by one Gaussian step and wraps into the box.
    ///
    /// Draws `n` normals for x, then `n` for y, scales them by `step_length`
    /// and adds them to the current coordinates. This is the only operation
    /// that mutates the ensemble.
    pub fn advance(&mut self) {
        let n = self.particle_count();

        let dx = DVector::from_vec(self.source.draw_normal(n));
        let dy = DVector::from_vec(self.source.draw_normal(n));
        debug_assert_eq!(dx.len(), n, "source returned the wrong number of draws");
        debug_assert_eq!(dy.len(), n, "source returned the wrong number of draws");

        // x <- step_length * dx + x
        self.x.axpy(self.step_length, &dx, 1.0);
        self.y.axpy(self.step_length, &dy, 1.0);

        let domain = &self.domain;
        self.x.apply(|v| *v = domain.wrap_x(*v));
        self.y.apply(|v| *v = domain.wrap_y(*v));

        self.steps_done += 1;
    }

    /// Unweighted mean position.
    pub fn center_of_mass(&self) -> (f64, f64) {
        (self.x.mean(), self.y.mean())
    }

    /// Population variance of x plus population variance of y.
    ///
    /// Uses the ddof = 0 convention (divide by `n`). Computed about the mean
    /// in two passes, so the value is never negative and is exactly `0.0`
    /// for a single particle.
    pub fn moment_of_inertia(&self) -> f64 {
        population_variance(&self.x) + population_variance(&self.y)
    }

    /// Bundles the step counter and both diagnostics. Does not advance state.
    pub fn diagnostics(&self) -> DiagnosticRecord {
        let (center_of_mass_x, center_of_mass_y) = self.center_of_mass();
        DiagnosticRecord {
            step: self.steps_done,
            center_of_mass_x,
            center_of_mass_y,
            moment_of_inertia: self.moment_of_inertia(),
        }
    }

    /// Owned snapshot of the current positions.
    pub fn positions(&self) -> Vec<Position> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Position { x, y })
            .collect()
    }

    pub fn particle_count(&self) -> usize {
        self.x.len()
    }

    pub fn steps_done(&self) -> u64 {
        self.steps_done
    }

    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// The shared domain.
    pub fn domain(&self) -> &Arc<PeriodicDomain> {
        &self.domain
    }

    /// Current x coordinates.
    pub fn x(&self) -> &[f64] {
        self.x.as_slice()
    }

    /// Current y coordinates.
    pub fn y(&self) -> &[f64] {
        self.y.as_slice()
    }

    /// The injected draw source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the ensemble, handing its source back.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Largest accepted `step_length`.
///
/// Standard-normal draws stay far below 1e8 in magnitude, so
/// `x + step_length * draw` remains finite and the periodic wrap stays
/// well defined. Larger values would overflow to infinity and wrap to NaN.
pub const MAX_STEP_LENGTH: f64 = 1e300;

/// Checks that `step_length` is finite, non-negative and at most
/// [`MAX_STEP_LENGTH`].
pub fn validate_step_length(step_length: f64) -> Result<()> {
    if !(step_length.is_finite() && step_length >= 0.0) {
        return Err(WalkError::validation(format!(
            "step_length must be finite and >= 0, got {}",
            step_length
        )));
    }
    if step_length > MAX_STEP_LENGTH {
        return Err(WalkError::validation(format!(
            "step_length must be <= {:e}, got {:e}",
            MAX_STEP_LENGTH, step_length
        )));
    }
    Ok(())
}

fn population_variance(v: &DVector<f64>) -> f64 {
    let mean = v.mean();
    v.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / v.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use periwalk_env::{ReplaySource, SeededSource};
    use proptest::prelude::*;

    fn shared_box() -> Arc<PeriodicDomain> {
        Arc::new(PeriodicDomain::new(10.0, 20.0).unwrap())
    }

    fn assert_contained<S: NormalSource>(ensemble: &ParticleEnsemble<S>) {
        let domain = ensemble.domain();
        for (x, y) in ensemble.x().iter().zip(ensemble.y()) {
            assert!(domain.contains(*x, *y), "({}, {}) escaped the box", x, y);
        }
    }

    #[test]
    fn test_construction_errors() {
        let domain = shared_box();

        let mismatched = ParticleEnsemble::new(
            domain.clone(),
            ReplaySource::zeros(),
            vec![1.0, 2.0],
            vec![1.0],
            0.5,
        );
        assert_eq!(mismatched.unwrap_err(), WalkError::shape(2, 1, 2));

        let empty =
            ParticleEnsemble::new(domain.clone(), ReplaySource::zeros(), vec![], vec![], 0.5);
        assert!(matches!(empty, Err(WalkError::Validation(_))));

        let negative_step =
            ParticleEnsemble::centered(domain.clone(), ReplaySource::zeros(), 4, -0.1);
        assert!(matches!(negative_step, Err(WalkError::Validation(_))));

        let nan_step =
            ParticleEnsemble::centered(domain.clone(), ReplaySource::zeros(), 4, f64::NAN);
        assert!(matches!(nan_step, Err(WalkError::Validation(_))));

        let bad_position = ParticleEnsemble::new(
            domain.clone(),
            ReplaySource::zeros(),
            vec![f64::INFINITY],
            vec![1.0],
            0.5,
        );
        assert!(matches!(bad_position, Err(WalkError::Validation(_))));

        let wrong_count = ParticleEnsemble::with_particle_count(
            domain.clone(),
            ReplaySource::zeros(),
            3,
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            0.5,
        );
        assert_eq!(wrong_count.unwrap_err(), WalkError::shape(2, 2, 3));

        let zero_count = ParticleEnsemble::centered(domain, ReplaySource::zeros(), 0, 0.5);
        assert!(matches!(zero_count, Err(WalkError::Validation(_))));
    }

    #[test]
    fn test_overflowing_step_length_is_rejected() {
        let huge = ParticleEnsemble::centered(shared_box(), SeededSource::new(1), 50, f64::MAX);
        assert!(matches!(huge, Err(WalkError::Validation(_))));

        let just_over = validate_step_length(MAX_STEP_LENGTH * 2.0);
        assert!(matches!(just_over, Err(WalkError::Validation(_))));

        assert!(validate_step_length(MAX_STEP_LENGTH).is_ok());
        assert!(validate_step_length(0.0).is_ok());
    }

    #[test]
    fn test_largest_step_length_stays_in_box() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(1), 50, MAX_STEP_LENGTH)
                .unwrap();

        for _ in 0..20 {
            ensemble.advance();
            assert_contained(&ensemble);
            assert!(ensemble.moment_of_inertia().is_finite());
        }
    }

    #[test]
    fn test_initial_positions_are_wrapped() {
        let ensemble = ParticleEnsemble::new(
            shared_box(),
            ReplaySource::zeros(),
            vec![-1.0, 12.0],
            vec![25.0, 3.0],
            0.5,
        )
        .unwrap();

        assert_eq!(ensemble.x(), &[9.0, 2.0]);
        assert_eq!(ensemble.y(), &[5.0, 3.0]);
        assert_contained(&ensemble);
    }

    #[test]
    fn test_centered_ensemble() {
        let ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(1), 50, 0.5).unwrap();

        assert_eq!(ensemble.particle_count(), 50);
        assert_eq!(ensemble.steps_done(), 0);
        assert_eq!(ensemble.center_of_mass(), (5.0, 10.0));
        assert_eq!(ensemble.moment_of_inertia(), 0.0);
    }

    #[test]
    fn test_step_counting() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(42), 10, 0.5).unwrap();

        for k in 1..=17u64 {
            ensemble.advance();
            assert_eq!(ensemble.steps_done(), k);
        }
    }

    #[test]
    fn test_advance_applies_scaled_draws() {
        // draws: x <- [1, -1], y <- [2, -2]
        let source = ReplaySource::new(vec![1.0, -1.0, 2.0, -2.0]);
        let mut ensemble =
            ParticleEnsemble::new(shared_box(), source, vec![1.0, 2.0], vec![3.0, 4.0], 0.5)
                .unwrap();

        ensemble.advance();

        assert_eq!(ensemble.x(), &[1.5, 1.5]);
        assert_eq!(ensemble.y(), &[4.0, 3.0]);
        assert_eq!(ensemble.source().drawn(), 4);
    }

    #[test]
    fn test_advance_wraps_across_edges() {
        let source = ReplaySource::new(vec![1.0, -1.0]);
        let mut ensemble =
            ParticleEnsemble::new(shared_box(), source, vec![9.8], vec![0.2], 0.5).unwrap();

        ensemble.advance();

        assert_relative_eq!(ensemble.x()[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(ensemble.y()[0], 19.7, epsilon = 1e-12);
        assert_contained(&ensemble);
    }

    #[test]
    fn test_zero_step_length_is_stable() {
        let x = vec![0.0, 2.5, 9.999, 7.25];
        let y = vec![19.5, 0.0, 10.0, 3.125];
        let mut ensemble = ParticleEnsemble::new(
            shared_box(),
            SeededSource::new(7),
            x.clone(),
            y.clone(),
            0.0,
        )
        .unwrap();

        for _ in 0..50 {
            ensemble.advance();
        }

        assert_eq!(ensemble.steps_done(), 50);
        for i in 0..x.len() {
            assert_relative_eq!(ensemble.x()[i], x[i], epsilon = 1e-12);
            assert_relative_eq!(ensemble.y()[i], y[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_particle_has_zero_inertia() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(3), 1, 3.0).unwrap();

        assert_eq!(ensemble.moment_of_inertia(), 0.0);
        for _ in 0..100 {
            ensemble.advance();
            assert_eq!(ensemble.moment_of_inertia(), 0.0);
        }
    }

    #[test]
    fn test_population_variance_convention() {
        let ensemble = ParticleEnsemble::new(
            shared_box(),
            ReplaySource::zeros(),
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            0.5,
        )
        .unwrap();

        assert_eq!(ensemble.center_of_mass(), (2.0, 2.0));
        // Population variance of [1, 3] is 1 (sample variance would be 2)
        assert_relative_eq!(ensemble.moment_of_inertia(), 1.0);
    }

    #[test]
    fn test_diagnostics_is_side_effect_free() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(11), 20, 0.5).unwrap();
        ensemble.advance();
        ensemble.advance();

        let first = ensemble.diagnostics();
        let second = ensemble.diagnostics();

        assert_eq!(first, second);
        assert_eq!(first.step, 2);
        assert_eq!(ensemble.steps_done(), 2);
        assert_eq!(first.center_of_mass(), ensemble.center_of_mass());
        assert_eq!(first.moment_of_inertia, ensemble.moment_of_inertia());
    }

    #[test]
    fn test_positions_snapshot_is_independent() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(5), 8, 1.0).unwrap();

        let before = ensemble.positions();
        ensemble.advance();
        let after = ensemble.positions();

        assert!(before.iter().all(|p| *p == Position::new(5.0, 10.0)));
        assert_ne!(before, after);
        assert_eq!(after.len(), 8);
        assert_eq!(after[3], Position::new(ensemble.x()[3], ensemble.y()[3]));
    }

    #[test]
    fn test_large_steps_stay_in_box() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(99), 200, 1e3).unwrap();

        for _ in 0..50 {
            ensemble.advance();
            assert_contained(&ensemble);
            assert!(ensemble.moment_of_inertia() >= 0.0);
        }
    }

    #[test]
    fn test_shared_domain() {
        let domain = shared_box();
        let a = ParticleEnsemble::centered(domain.clone(), SeededSource::new(1), 4, 0.5).unwrap();
        let b = ParticleEnsemble::centered(domain.clone(), SeededSource::new(2), 4, 0.5).unwrap();

        assert_eq!(Arc::strong_count(&domain), 3);
        assert!(Arc::ptr_eq(a.domain(), b.domain()));
    }

    #[test]
    fn test_into_source_returns_stream_position() {
        let mut ensemble =
            ParticleEnsemble::centered(shared_box(), SeededSource::new(8), 5, 0.5).unwrap();
        ensemble.advance();

        let mut returned = ensemble.into_source();
        let mut reference = SeededSource::new(8);
        let _ = reference.draw_normal(10);

        assert_eq!(returned.draw_normal(3), reference.draw_normal(3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_advance_keeps_particles_in_box(seed in any::<u64>(), step in 0.0f64..1e300) {
            let mut ensemble =
                ParticleEnsemble::centered(shared_box(), SeededSource::new(seed), 16, step)
                    .unwrap();
            for _ in 0..5 {
                ensemble.advance();
                let domain = ensemble.domain();
                for (x, y) in ensemble.x().iter().zip(ensemble.y()) {
                    prop_assert!(domain.contains(*x, *y));
                }
            }
        }
    }
}
