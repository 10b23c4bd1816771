//! Panel data structures.

use nalgebra::Vector3;
use std::ops::Range;
use vl_core::WingId;

use crate::error::{GeometryError, GeometryResult};

/// One quadrilateral lattice element carrying a single horseshoe vortex.
///
/// Body axes: x aft, y starboard, z up. Edges `a` and `b` are the two spanwise
/// edges of the panel; the discretizer puts `a` inboard on both halves of a
/// mirrored wing. The solver orients each horseshoe from the edge positions,
/// so either labeling is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Owning wing
    pub wing: WingId,
    /// Leading-edge corners
    pub a1: Vector3<f64>,
    pub b1: Vector3<f64>,
    /// Bound vortex endpoints on the panel quarter-chord line
    pub ah: Vector3<f64>,
    pub bh: Vector3<f64>,
    /// Trailing-edge corners
    pub a2: Vector3<f64>,
    pub b2: Vector3<f64>,
    /// Three-quarter-chord points on each edge
    pub ac: Vector3<f64>,
    pub bc: Vector3<f64>,
    /// Collocation point (3/4 chord, mid-span)
    pub collocation: Vector3<f64>,
    /// Quarter-chord point at mid-span
    pub hinge: Vector3<f64>,
    /// Chord of the spanwise strip the panel belongs to [m]
    pub strip_chord: f64,
}

impl Panel {
    /// Spanwise width of the panel, projected on y [m].
    pub fn span_width(&self) -> f64 {
        (self.b1.y - self.a1.y).abs()
    }

    /// Tangent of the local chordwise slope between hinge and collocation point.
    pub fn slope_tangent(&self) -> f64 {
        (self.collocation.z - self.hinge.z) / (self.collocation.x - self.hinge.x)
    }

    /// Tangent of the local dihedral angle between the leading-edge corners.
    ///
    /// Twist rotates sections about the leading edge, so it does not enter here.
    pub fn dihedral_tangent(&self) -> f64 {
        (self.b1.z - self.a1.z) / (self.b1.y - self.a1.y)
    }

    /// Whether the bound vortex `ah → bh` points toward port.
    ///
    /// Such panels have their edges swapped by the solver so every bound
    /// vortex runs toward starboard, whatever side of the centerline it is on.
    pub fn runs_to_port(&self) -> bool {
        self.bh.y < self.ah.y
    }

    pub(crate) fn points(&self) -> [(&'static str, &Vector3<f64>); 10] {
        [
            ("a1", &self.a1),
            ("b1", &self.b1),
            ("ah", &self.ah),
            ("bh", &self.bh),
            ("a2", &self.a2),
            ("b2", &self.b2),
            ("ac", &self.ac),
            ("bc", &self.bc),
            ("collocation", &self.collocation),
            ("hinge", &self.hinge),
        ]
    }
}

/// Per-wing bookkeeping: tag, own reference area and number of spanwise strips.
#[derive(Debug, Clone, PartialEq)]
pub struct WingLayout {
    pub id: WingId,
    pub tag: String,
    /// Wing reference area [m^2]
    pub area: f64,
    /// Spanwise strips in this wing (both halves for mirrored wings)
    pub strips: usize,
}

/// Immutable, validated panel array grouped wing → strip → chordwise row.
///
/// Constructed through [`crate::PanelGeometryBuilder`] or [`crate::discretize`].
#[derive(Debug, Clone)]
pub struct PanelGeometry {
    pub(crate) wings: Vec<WingLayout>,
    pub(crate) panels: Vec<Panel>,
    pub(crate) chordwise_panels: usize,
    /// Start of each wing's panel block; one trailing entry with the panel count
    pub(crate) wing_offsets: Vec<usize>,
}

impl PanelGeometry {
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn wings(&self) -> &[WingLayout] {
        &self.wings
    }

    pub fn wing(&self, id: WingId) -> Option<&WingLayout> {
        self.wings.get(id.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panels per spanwise strip.
    pub fn chordwise_panels(&self) -> usize {
        self.chordwise_panels
    }

    /// Total number of spanwise strips over all wings.
    pub fn strip_count(&self) -> usize {
        self.panels.len() / self.chordwise_panels
    }

    /// Index range of the panels belonging to a wing.
    pub fn wing_panels(&self, id: WingId) -> Range<usize> {
        let w = id.index() as usize;
        self.wing_offsets[w]..self.wing_offsets[w + 1]
    }

    /// Index range of the panels in strip `strip` (global strip numbering).
    pub fn strip_panels(&self, strip: usize) -> Range<usize> {
        let start = strip * self.chordwise_panels;
        start..start + self.chordwise_panels
    }

    /// Strip containing panel `index`.
    pub fn strip_of(&self, index: usize) -> usize {
        index / self.chordwise_panels
    }

    /// Check the geometry against the discretization requested by the caller.
    pub fn check_settings(&self, spanwise: usize, chordwise: usize) -> GeometryResult<()> {
        if chordwise != self.chordwise_panels {
            return Err(GeometryError::ChordwiseCount {
                geometry: self.chordwise_panels,
                settings: chordwise,
            });
        }
        for wing in &self.wings {
            if spanwise == 0 || wing.strips % spanwise != 0 {
                return Err(GeometryError::StripCount {
                    tag: wing.tag.clone(),
                    strips: wing.strips,
                    spanwise,
                });
            }
        }
        Ok(())
    }

    /// Sum of the wing reference areas [m^2].
    pub fn total_wing_area(&self) -> f64 {
        self.wings.iter().map(|w| w.area).sum()
    }
}
