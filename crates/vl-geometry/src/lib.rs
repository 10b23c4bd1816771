//! vl-geometry: lifting-surface panel layer for vortexlift.
//!
//! Provides:
//! - Strongly typed panel arrays (`Panel`, `WingLayout`, `PanelGeometry`)
//! - Incremental builder with validation of the wing/strip/row ordering
//! - A straight-tapered planform discretizer producing panel geometry
//!
//! # Example
//!
//! ```
//! use vl_core::m;
//! use vl_geometry::{WingPlanform, discretize};
//!
//! let wing = WingPlanform::rectangular("main_wing", m(8.0), m(1.0));
//! let geometry = discretize(&[wing], 5, 1).unwrap();
//!
//! assert_eq!(geometry.wings().len(), 1);
//! assert_eq!(geometry.panels().len(), 10);
//! ```

pub mod builder;
pub mod error;
pub mod panel;
pub mod planform;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::PanelGeometryBuilder;
pub use error::{GeometryError, GeometryResult};
pub use panel::{Panel, PanelGeometry, WingLayout};
pub use planform::{WingPlanform, discretize};
