//! # periwalk Core
//!
//! Random-walk ensemble engine on a periodic 2-D box.
//!
//! ## The Three Components
//!
//! 1. **Domain** ([`domain`]): coordinate wrapping over `[0, Lx) × [0, Ly)`
//! 2. **Ensemble** ([`ensemble`]): particle state, Gaussian update rule, diagnostics
//! 3. **Records** ([`diagnostics`]): immutable per-step summaries and snapshots
//!
//! The driver that strings advance/diagnose cycles into a time series lives in
//! `periwalk_sim`; randomness is injected through `periwalk_env::NormalSource`.
//!
//! ## Conventions
//!
//! - Moment of inertia is the sum of **population** variances (ddof = 0).
//! - Ensembles with zero particles are rejected at construction.
//! - `step_length` is capped at [`MAX_STEP_LENGTH`] so positions never overflow.

pub mod diagnostics;
pub mod domain;
pub mod ensemble;
pub mod error;

pub use diagnostics::{DiagnosticRecord, Position};
pub use domain::PeriodicDomain;
pub use ensemble::{validate_step_length, ParticleEnsemble, MAX_STEP_LENGTH};
pub use error::{Result, WalkError};
