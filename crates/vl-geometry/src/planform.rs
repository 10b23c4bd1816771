//! Straight-tapered wing planforms and their lattice discretization.
//!
//! A planform is described by its root and tip chords, leading-edge sweep,
//! dihedral and a linear twist distribution. `discretize` lays out uniform
//! spanwise strips and chordwise rows and produces the panel corner,
//! bound-vortex and collocation coordinates the solver consumes.

use nalgebra::Vector3;
use vl_core::{Angle, Length, WingId, deg, meters, radians};

use crate::builder::PanelGeometryBuilder;
use crate::error::{GeometryError, GeometryResult};
use crate::panel::{Panel, PanelGeometry};

/// Chord fractions (within one panel) of the leading edge, bound vortex,
/// trailing edge and collocation line.
const LEADING_EDGE: f64 = 0.0;
const QUARTER_CHORD: f64 = 0.25;
const TRAILING_EDGE: f64 = 1.0;
const THREE_QUARTER_CHORD: f64 = 0.75;

/// Trapezoidal lifting surface.
#[derive(Debug, Clone, PartialEq)]
pub struct WingPlanform {
    pub tag: String,
    /// Root leading-edge position in body axes [m]
    pub origin: Vector3<f64>,
    /// Projected semi-span (root to tip along y)
    pub semi_span: Length,
    pub root_chord: Length,
    pub tip_chord: Length,
    /// Leading-edge sweep
    pub sweep: Angle,
    pub dihedral: Angle,
    /// Incidence at root and tip, positive nose up
    pub root_twist: Angle,
    pub tip_twist: Angle,
    /// Mirror the surface about the aircraft centerline
    pub symmetric: bool,
}

impl WingPlanform {
    /// Untwisted, unswept, symmetric rectangular wing of full `span` and `chord`.
    pub fn rectangular(tag: impl Into<String>, span: Length, chord: Length) -> Self {
        Self {
            tag: tag.into(),
            origin: Vector3::zeros(),
            semi_span: span / 2.0,
            root_chord: chord,
            tip_chord: chord,
            sweep: deg(0.0),
            dihedral: deg(0.0),
            root_twist: deg(0.0),
            tip_twist: deg(0.0),
            symmetric: true,
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64, z: f64) -> Self {
        self.origin = Vector3::new(x, y, z);
        self
    }

    pub fn with_tip_chord(mut self, tip_chord: Length) -> Self {
        self.tip_chord = tip_chord;
        self
    }

    pub fn with_sweep(mut self, sweep: Angle) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_dihedral(mut self, dihedral: Angle) -> Self {
        self.dihedral = dihedral;
        self
    }

    pub fn with_twist(mut self, root: Angle, tip: Angle) -> Self {
        self.root_twist = root;
        self.tip_twist = tip;
        self
    }

    pub fn one_sided(mut self) -> Self {
        self.symmetric = false;
        self
    }

    /// Projected span over both halves when mirrored [m].
    pub fn span(&self) -> f64 {
        let b = meters(self.semi_span);
        if self.symmetric { 2.0 * b } else { b }
    }

    /// Projected planform area [m^2].
    pub fn area(&self) -> f64 {
        let half = meters(self.semi_span) * 0.5 * (meters(self.root_chord) + meters(self.tip_chord));
        if self.symmetric { 2.0 * half } else { half }
    }

    pub fn aspect_ratio(&self) -> f64 {
        let b = self.span();
        b * b / self.area()
    }

    pub fn taper_ratio(&self) -> f64 {
        meters(self.tip_chord) / meters(self.root_chord)
    }

    /// Mean aerodynamic chord of the trapezoid [m].
    pub fn mean_aerodynamic_chord(&self) -> f64 {
        let lambda = self.taper_ratio();
        2.0 / 3.0 * meters(self.root_chord) * (1.0 + lambda + lambda * lambda) / (1.0 + lambda)
    }

    fn validate(&self) -> GeometryResult<()> {
        let invalid = |what| GeometryError::InvalidPlanform {
            tag: self.tag.clone(),
            what,
        };
        if !(meters(self.semi_span) > 0.0) {
            return Err(invalid("semi-span must be positive"));
        }
        if !(meters(self.root_chord) > 0.0) || !(meters(self.tip_chord) > 0.0) {
            return Err(invalid("chords must be positive"));
        }
        if radians(self.sweep).abs() >= std::f64::consts::FRAC_PI_2
            || radians(self.dihedral).abs() >= std::f64::consts::FRAC_PI_2
        {
            return Err(invalid("sweep and dihedral must be below 90 degrees"));
        }
        if self.symmetric && self.origin.y < 0.0 {
            return Err(invalid("mirrored wing root must not lie on the port side"));
        }
        if !self.origin.iter().all(|c| c.is_finite()) {
            return Err(invalid("origin must be finite"));
        }
        Ok(())
    }

    /// Point at chord fraction `fraction` of the section at local span station `y`.
    fn station(&self, y: f64, fraction: f64) -> Vector3<f64> {
        let semi_span = meters(self.semi_span);
        let eta = y / semi_span;
        let root = meters(self.root_chord);
        let chord = root + (meters(self.tip_chord) - root) * eta;
        let twist = radians(self.root_twist) + (radians(self.tip_twist) - radians(self.root_twist)) * eta;

        let x_le = self.origin.x + y * radians(self.sweep).tan();
        let z_le = self.origin.z + y * radians(self.dihedral).tan();
        Vector3::new(
            x_le + fraction * chord * twist.cos(),
            self.origin.y + y,
            z_le - fraction * chord * twist.sin(),
        )
    }

    fn chord_at(&self, y: f64) -> f64 {
        let root = meters(self.root_chord);
        root + (meters(self.tip_chord) - root) * y / meters(self.semi_span)
    }

    fn push_panels(
        &self,
        builder: &mut PanelGeometryBuilder,
        wing: WingId,
        spanwise: usize,
        chordwise: usize,
    ) {
        let semi_span = meters(self.semi_span);
        let halves: &[f64] = if self.symmetric { &[1.0, -1.0] } else { &[1.0] };

        for &side in halves {
            let mirror = |p: Vector3<f64>| Vector3::new(p.x, side * p.y, p.z);
            for strip in 0..spanwise {
                let ya = semi_span * strip as f64 / spanwise as f64;
                let yb = semi_span * (strip + 1) as f64 / spanwise as f64;
                let strip_chord = self.chord_at(0.5 * (ya + yb));

                for row in 0..chordwise {
                    let f = |q: f64| (row as f64 + q) / chordwise as f64;
                    let edge = |y: f64, q: f64| mirror(self.station(y, f(q)));

                    let ac = edge(ya, THREE_QUARTER_CHORD);
                    let bc = edge(yb, THREE_QUARTER_CHORD);
                    let ah = edge(ya, QUARTER_CHORD);
                    let bh = edge(yb, QUARTER_CHORD);
                    builder.push_panel(Panel {
                        wing,
                        a1: edge(ya, LEADING_EDGE),
                        b1: edge(yb, LEADING_EDGE),
                        ah,
                        bh,
                        a2: edge(ya, TRAILING_EDGE),
                        b2: edge(yb, TRAILING_EDGE),
                        ac,
                        bc,
                        collocation: (ac + bc) * 0.5,
                        hinge: (ah + bh) * 0.5,
                        strip_chord,
                    });
                }
            }
        }
    }
}

/// Discretize planforms into a lattice of `spanwise` strips per semi-span and
/// `chordwise` rows per strip.
///
/// Mirrored wings list their starboard strips root to tip, then the port strips
/// root to tip, as a single wing group.
pub fn discretize(
    wings: &[WingPlanform],
    spanwise: usize,
    chordwise: usize,
) -> GeometryResult<PanelGeometry> {
    if spanwise == 0 {
        return Err(GeometryError::Empty {
            what: "spanwise panels",
        });
    }

    let mut builder = PanelGeometryBuilder::new(chordwise);
    for planform in wings {
        planform.validate()?;
        let halves = if planform.symmetric { 2 } else { 1 };
        let id = builder.add_wing(planform.tag.clone(), planform.area(), halves * spanwise);
        planform.push_panels(&mut builder, id, spanwise, chordwise);
    }
    builder.build()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use vl_core::m;

    proptest! {
        #[test]
        fn strip_areas_sum_to_planform_area(
            span in 1.0_f64..40.0,
            root in 0.2_f64..5.0,
            taper in 0.2_f64..1.0,
            sweep in -30.0_f64..45.0,
            spanwise in 1_usize..12,
            chordwise in 1_usize..4,
        ) {
            let wing = WingPlanform::rectangular("w", m(span), m(root))
                .with_tip_chord(m(root * taper))
                .with_sweep(deg(sweep));
            let geometry = discretize(&[wing.clone()], spanwise, chordwise).unwrap();
            let strip_area: f64 = (0..geometry.strip_count())
                .map(|s| {
                    let first = &geometry.panels()[geometry.strip_panels(s).start];
                    first.strip_chord * first.span_width()
                })
                .sum();
            prop_assert!((strip_area - wing.area()).abs() < 1e-9 * wing.area());
        }
    }
}
