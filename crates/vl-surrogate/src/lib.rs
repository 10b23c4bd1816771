//! vl-surrogate: linear lift and induced-drag surrogates trained on the vortex lattice.
//!
//! The lattice is solved once at every angle of a small training grid and a
//! first-degree least-squares fit against angle of attack is kept for total
//! lift, total induced drag and the lift of each wing. Evaluating the frozen
//! surrogate is a pure read.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use vl_core::{deg, m, m2};
//! use vl_geometry::{WingPlanform, discretize};
//! use vl_solver::{ReferenceValues, VlmSettings};
//! use vl_surrogate::{TrainingGrid, train};
//!
//! let wing = WingPlanform::rectangular("main_wing", m(8.0), m(1.0));
//! let geometry = discretize(&[wing], 5, 1).unwrap();
//! let settings = VlmSettings::new(ReferenceValues::new(m2(8.0), m(1.0), Vector3::new(0.25, 0.0, 0.0)));
//!
//! let surrogate = train(&geometry, &settings, &TrainingGrid::default()).unwrap();
//! let out = surrogate.evaluate(deg(3.0)).unwrap();
//! assert!(out.lift > 0.0);
//! ```

pub mod analysis;
pub mod error;
pub mod fit;
pub mod grid;
pub mod model;

pub use analysis::VortexLatticeAnalysis;
pub use error::{SurrogateError, SurrogateResult};
pub use fit::LinearFit;
pub use grid::TrainingGrid;
pub use model::{
    EnvelopePolicy, SurrogateOutput, TrainedSurrogate, TrainingData, WingFit, WingLift,
    WingTraining, train,
};
