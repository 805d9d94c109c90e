//! Periodic rectangular domain.
//!
//! The box is anchored at the origin and covers `[0, length_x) × [0, length_y)`.
//! Opposite edges are identified, so every real coordinate has exactly one
//! canonical representative inside the box.

use crate::error::{Result, WalkError};
use serde::{Deserialize, Serialize};

/// Immutable periodic box.
///
/// Both extents are finite and strictly positive for the lifetime of the
/// value; the fields are private so that invariant cannot be broken after
/// [`PeriodicDomain::new`]. Being `Copy + Send + Sync` with no interior
/// state, one domain can be shared (usually behind an `Arc`) by any number
/// of ensembles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainExtents")]
pub struct PeriodicDomain {
    /// Extent along x
    length_x: f64,

    /// Extent along y
    length_y: f64,
}

/// Unvalidated wire form of a domain.
#[derive(Deserialize)]
struct DomainExtents {
    length_x: f64,
    length_y: f64,
}

impl TryFrom<DomainExtents> for PeriodicDomain {
    type Error = WalkError;

    fn try_from(raw: DomainExtents) -> Result<Self> {
        Self::new(raw.length_x, raw.length_y)
    }
}

impl PeriodicDomain {
    /// Creates a new domain.
    ///
    /// # Errors
    /// `WalkError::Validation` if either extent is non-positive or non-finite.
    pub fn new(length_x: f64, length_y: f64) -> Result<Self> {
        if !(length_x.is_finite() && length_x > 0.0) {
            return Err(WalkError::validation(format!(
                "length_x must be finite and > 0, got {}",
                length_x
            )));
        }
        if !(length_y.is_finite() && length_y > 0.0) {
            return Err(WalkError::validation(format!(
                "length_y must be finite and > 0, got {}",
                length_y
            )));
        }
        Ok(Self { length_x, length_y })
    }

    /// Extent along x.
    pub fn length_x(&self) -> f64 {
        self.length_x
    }

    /// Extent along y.
    pub fn length_y(&self) -> f64 {
        self.length_y
    }

    /// Midpoint of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.length_x / 2.0, self.length_y / 2.0)
    }

    /// Returns true if `(x, y)` already lies in the canonical box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.length_x).contains(&x) && (0.0..self.length_y).contains(&y)
    }

    /// Wraps a single x coordinate into `[0, length_x)`.
    pub fn wrap_x(&self, x: f64) -> f64 {
        wrap(x, self.length_x)
    }

    /// Wraps a single y coordinate into `[0, length_y)`.
    pub fn wrap_y(&self, y: f64) -> f64 {
        wrap(y, self.length_y)
    }

    /// Wraps one point into the box.
    pub fn normalize_point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.wrap_x(x), self.wrap_y(y))
    }

    /// Wraps index-aligned coordinate sequences into the box.
    ///
    /// Uses mathematical (non-negative) modulo, so `-0.1` on a box of
    /// length 10 maps to `9.9`. Values already inside the box are returned
    /// unchanged. Non-finite inputs (NaN, ±infinity) are not meaningful
    /// positions and come back as NaN.
    ///
    /// # Errors
    /// `WalkError::ShapeMismatch` if `x` and `y` differ in length.
    pub fn normalize(&self, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if x.len() != y.len() {
            return Err(WalkError::shape(x.len(), y.len(), x.len()));
        }
        let xs = x.iter().map(|&v| self.wrap_x(v)).collect();
        let ys = y.iter().map(|&v| self.wrap_y(v)).collect();
        Ok((xs, ys))
    }
}

/// Non-negative remainder of `value` modulo `length`, strictly below `length`.
fn wrap(value: f64, length: f64) -> f64 {
    let r = value.rem_euclid(length);
    // rem_euclid rounds tiny negatives (e.g. -1e-20) up to exactly `length`
    if r >= length {
        0.0
    } else {
        r
    }
}
