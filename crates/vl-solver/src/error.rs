//! Error types for solver operations.

use thiserror::Error;
use vl_core::VlError;
use vl_geometry::GeometryError;

use crate::kernel::KernelError;

/// Errors that can occur while assembling or solving the lattice system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid settings: {what}")]
    InvalidSettings { what: &'static str },

    #[error("Invalid flow state: {what}")]
    InvalidFlow { what: &'static str },

    #[error("Degenerate vortex geometry ({segment} of panel {panel} at collocation point {collocation}): {source}")]
    Kernel {
        collocation: usize,
        panel: usize,
        segment: &'static str,
        source: KernelError,
    },

    #[error(
        "Degenerate wake geometry for sample {sample} (alpha = {angle_deg:.3} deg, {segment} of panel {panel} at collocation point {collocation}): {source}"
    )]
    WakeKernel {
        sample: usize,
        angle_deg: f64,
        collocation: usize,
        panel: usize,
        segment: &'static str,
        source: KernelError,
    },

    #[error("Singular influence matrix for sample {sample} (alpha = {angle_deg:.3} deg)")]
    SingularSystem { sample: usize, angle_deg: f64 },

    #[error(
        "Ill-conditioned influence matrix for sample {sample} (alpha = {angle_deg:.3} deg, pivot ratio {pivot_ratio:e})"
    )]
    IllConditioned {
        sample: usize,
        angle_deg: f64,
        pivot_ratio: f64,
    },

    #[error("Non-finite {what} for sample {sample}")]
    NonFinite { sample: usize, what: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Angle-of-attack sample this error belongs to, if it is sample specific.
    pub fn sample(&self) -> Option<usize> {
        match self {
            SolverError::WakeKernel { sample, .. }
            | SolverError::SingularSystem { sample, .. }
            | SolverError::IllConditioned { sample, .. }
            | SolverError::NonFinite { sample, .. } => Some(*sample),
            _ => None,
        }
    }
}

impl From<SolverError> for VlError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Geometry(g) => g.into(),
            SolverError::InvalidSettings { what } | SolverError::InvalidFlow { what } => {
                VlError::InvalidArg { what }
            }
            SolverError::Kernel { .. } | SolverError::WakeKernel { .. } => VlError::Invariant {
                what: "degenerate vortex geometry",
            },
            SolverError::SingularSystem { .. } | SolverError::IllConditioned { .. } => {
                VlError::Invariant {
                    what: "influence matrix",
                }
            }
            SolverError::NonFinite { what, .. } => VlError::NonFinite {
                what,
                value: f64::NAN,
            },
        }
    }
}
