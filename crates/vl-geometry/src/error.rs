//! Geometry-specific error types.

use vl_core::{VlError, WingId};
use thiserror::Error;

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Panel geometry construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Geometry has no {what}")]
    Empty { what: &'static str },

    #[error("Wing tag must not be empty")]
    EmptyWingTag,

    #[error("Duplicate wing tag: {tag}")]
    DuplicateWingTag { tag: String },

    #[error("Wing {tag} has invalid {what}: {value}")]
    InvalidWing {
        tag: String,
        what: &'static str,
        value: f64,
    },

    #[error("Panel {index} refers to non-existent wing {wing}")]
    UnknownWing { index: usize, wing: WingId },

    #[error("Panel {index} belongs to wing {found} but wing {expected} was expected at this position")]
    PanelOrder {
        index: usize,
        expected: WingId,
        found: WingId,
    },

    #[error("Wing {tag} declares {expected} panels but {actual} were supplied")]
    PanelCount {
        tag: String,
        expected: usize,
        actual: usize,
    },

    #[error("Wing {tag} has {strips} strips, not a multiple of {spanwise} spanwise panels")]
    StripCount {
        tag: String,
        strips: usize,
        spanwise: usize,
    },

    #[error("Geometry has {geometry} chordwise panels per strip but settings request {settings}")]
    ChordwiseCount { geometry: usize, settings: usize },

    #[error("Panel {index} is degenerate: {reason}")]
    DegeneratePanel { index: usize, reason: &'static str },

    #[error("Invalid planform {tag}: {what}")]
    InvalidPlanform { tag: String, what: &'static str },

    #[error("Core error: {0}")]
    Core(String),
}

impl From<VlError> for GeometryError {
    fn from(err: VlError) -> Self {
        GeometryError::Core(err.to_string())
    }
}

impl From<GeometryError> for VlError {
    fn from(err: GeometryError) -> Self {
        VlError::Invariant {
            what: Box::leak(err.to_string().into_boxed_str()),
        }
    }
}
