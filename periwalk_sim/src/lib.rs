//! periwalk Simulation Harness
//!
//! This crate strings the engine components into complete runs:
//! - **Driver**: advance/diagnose cycles collected into a [`SimulationResult`]
//! - **Batch**: one configuration over many seeds, each run checked
//!   against the engine invariants
//! - **Export**: JSON output for plotting or further analysis
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SimulationDriver                      │
//! │                                                          │
//! │   step 0: diagnostics()                                  │
//! │   step k: advance() ──► diagnostics() ──► push(record)   │
//! │                 │                                        │
//! │  ┌──────────────▼───────────┐   ┌──────────────────────┐ │
//! │  │     ParticleEnsemble     │──►│ Arc<PeriodicDomain>  │ │
//! │  │  (x, y, step_length)     │   │  (shared, immutable) │ │
//! │  └──────────────┬───────────┘   └──────────────────────┘ │
//! │                 │ owns                                   │
//! │  ┌──────────────▼───────────┐                            │
//! │  │  NormalSource (seeded)   │                            │
//! │  └──────────────────────────┘                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use periwalk_sim::{run, SeededSource};
//!
//! let result = run(10.0, 20.0, 100, 100, 0.5, SeededSource::new(42)).unwrap();
//! assert_eq!(result.diagnostics.len(), 100);
//! ```

mod batch;
mod config;
mod driver;
mod exporter;
mod result;
pub mod scenarios;

pub use batch::{check_result, BatchRunner, RunSummary};
pub use config::WalkConfig;
pub use driver::{run, SimulationDriver};
pub use exporter::RunExport;
pub use result::SimulationResult;

pub use periwalk_core::{DiagnosticRecord, PeriodicDomain, Position, WalkError};
pub use periwalk_env::{NormalSource, SeededSource, ThreadSource};
