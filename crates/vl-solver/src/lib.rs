//! Vortex-lattice panel solver for multi-wing configurations.
//!
//! This crate evaluates horseshoe-vortex influence coefficients over a batch of
//! angle-of-attack samples, solves the flow-tangency system for the panel
//! circulations of every sample, and integrates them into section, per-wing and
//! whole-aircraft lift, induced-drag and pitching-moment coefficients.

pub mod aic;
pub mod coefficients;
pub mod error;
pub mod influence;
pub mod kernel;
pub mod settings;
pub mod solve;

pub use aic::FlowTangency;
pub use coefficients::{SampleCoefficients, SectionCoefficients, SolveResult, WingCoefficients};
pub use error::{SolverError, SolverResult};
pub use influence::{InfluenceMatrix, InfluenceTensor, LatticeInfluence, assemble_influence};
pub use kernel::{KernelError, segment_velocity, semi_infinite_velocity};
pub use settings::{FlowState, ReferenceValues, VlmSettings};
pub use solve::{solve, solve_samples};
