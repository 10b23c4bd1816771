//! vl-core: stable foundation for vortexlift.
//!
//! Contains:
//! - units (uom SI types + constructors for angles, lengths and areas)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for wings)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{VlError, VlResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
