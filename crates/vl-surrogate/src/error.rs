//! Surrogate errors.

use thiserror::Error;
use vl_core::VlError;
use vl_solver::SolverError;

pub type SurrogateResult<T> = Result<T, SurrogateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurrogateError {
    /// A training solve failed.
    #[error("Training solve failed: {0}")]
    Solver(#[from] SolverError),

    #[error("Invalid training grid: {what}")]
    InvalidGrid { what: &'static str },

    /// Not enough distinct abscissae for a first-degree fit.
    #[error("Cannot fit {what}: {reason}")]
    Fit {
        what: &'static str,
        reason: &'static str,
    },

    #[error("Surrogate has not been trained")]
    NotTrained,

    #[error("Surrogate is already trained")]
    AlreadyTrained,

    #[error("Invalid query angle {value}")]
    InvalidQuery { value: f64 },
}

impl From<SurrogateError> for VlError {
    fn from(err: SurrogateError) -> Self {
        match err {
            SurrogateError::Solver(e) => e.into(),
            SurrogateError::InvalidGrid { what } => VlError::InvalidArg { what },
            SurrogateError::Fit { what, .. } => VlError::Invariant { what },
            SurrogateError::NotTrained => VlError::Invariant {
                what: "surrogate queried before training",
            },
            SurrogateError::AlreadyTrained => VlError::Invariant {
                what: "surrogate trained twice",
            },
            SurrogateError::InvalidQuery { value } => VlError::NonFinite {
                what: "query angle",
                value,
            },
        }
    }
}
