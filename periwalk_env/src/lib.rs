//! periwalk Environment Abstraction Layer
//!
//! This crate isolates the only source of non-determinism in the random-walk
//! engine: the stream of standard-normal draws that moves the particles.
//!
//! # Core Concept: Injected Randomness
//!
//! The engine never touches a process-wide generator. Every ensemble owns a
//! [`NormalSource`] handed to it at construction:
//! - **Simulation**: [`SeededSource`] - ChaCha8 seeded from a single `u64`
//! - **Production**: [`ThreadSource`] - OS-seeded thread-local generator
//! - **Tests**: [`ReplaySource`] - a fixed, cycling list of draws
//!
//! Deriving all entropy from one seed means any run can be reproduced
//! from its seed number.
//!
//! # Example
//!
//! ```
//! use periwalk_env::{NormalSource, SeededSource};
//!
//! let mut a = SeededSource::new(42);
//! let mut b = SeededSource::new(42);
//! assert_eq!(a.draw_normal(8), b.draw_normal(8));
//! ```

mod replay;
mod seeded;
mod source;
mod thread;

pub use replay::ReplaySource;
pub use seeded::SeededSource;
pub use source::NormalSource;
pub use thread::ThreadSource;
