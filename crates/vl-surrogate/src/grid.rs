//! Angle-of-attack training grids.

use serde::{Deserialize, Serialize};
use vl_core::{Angle, Tolerances, linspace, nearly_equal, radians};

use crate::error::{SurrogateError, SurrogateResult};

/// Angles of attack [rad] at which the lattice is solved for training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingGrid {
    angles: Vec<f64>,
}

impl TrainingGrid {
    /// Default sweep in degrees.
    pub const DEFAULT_DEGREES: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

    pub fn from_degrees(angles: &[f64]) -> Self {
        Self {
            angles: angles.iter().map(|a| a.to_radians()).collect(),
        }
    }

    pub fn from_angles(angles: &[Angle]) -> Self {
        Self {
            angles: angles.iter().map(|a| radians(*a)).collect(),
        }
    }

    pub fn from_radians(angles: Vec<f64>) -> Self {
        Self { angles }
    }

    /// `points` evenly spaced angles from `start` to `end` inclusive.
    pub fn linear(start: Angle, end: Angle, points: usize) -> Self {
        Self {
            angles: linspace(radians(start), radians(end), points),
        }
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Smallest and largest training angle [rad].
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.angles.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
    }

    pub fn validate(&self) -> SurrogateResult<()> {
        if self.angles.iter().any(|a| !a.is_finite()) {
            return Err(SurrogateError::InvalidGrid {
                what: "angles must be finite",
            });
        }
        if self.angles.iter().any(|a| a.abs() >= std::f64::consts::FRAC_PI_2) {
            return Err(SurrogateError::InvalidGrid {
                what: "angles must be within +/-90 degrees",
            });
        }
        match self.bounds() {
            Some((lo, hi)) if !nearly_equal(lo, hi, Tolerances::default()) => Ok(()),
            _ => Err(SurrogateError::InvalidGrid {
                what: "at least two distinct angles are required",
            }),
        }
    }
}

impl Default for TrainingGrid {
    fn default() -> Self {
        Self::from_degrees(&Self::DEFAULT_DEGREES)
    }
}
