//! Span-loaded circulation integrated into aerodynamic coefficients.

use nalgebra::DVector;
use std::f64::consts::PI;
use vl_core::WingId;
use vl_geometry::PanelGeometry;

use crate::influence::InfluenceMatrix;
use crate::settings::VlmSettings;

/// Lift and induced drag of one wing, referenced to the wing's own area.
#[derive(Debug, Clone, PartialEq)]
pub struct WingCoefficients {
    pub id: WingId,
    pub tag: String,
    pub lift: f64,
    pub induced_drag: f64,
}

/// Section coefficients of one spanwise strip, referenced to the strip area.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCoefficients {
    pub wing: WingId,
    /// Global strip index
    pub strip: usize,
    /// Spanwise station of the strip center [m]
    pub y: f64,
    pub lift: f64,
    pub induced_drag: f64,
}

/// Everything computed for one angle-of-attack sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCoefficients {
    /// Angle of attack [rad]
    pub angle_of_attack: f64,
    /// Total lift coefficient (aircraft reference area)
    pub lift: f64,
    /// Total induced-drag coefficient (aircraft reference area)
    pub induced_drag: f64,
    /// Pitching-moment coefficient about the reference point, positive nose up
    pub moment: f64,
    pub wings: Vec<WingCoefficients>,
    pub sections: Vec<SectionCoefficients>,
    /// Panel circulation, nondimensionalized by freestream speed
    pub circulation: Vec<f64>,
}

impl SampleCoefficients {
    pub fn wing(&self, tag: &str) -> Option<&WingCoefficients> {
        self.wings.iter().find(|w| w.tag == tag)
    }

    pub fn wing_sections(&self, id: WingId) -> impl Iterator<Item = &SectionCoefficients> {
        self.sections.iter().filter(move |s| s.wing == id)
    }
}

/// One row of coefficients per angle-of-attack sample, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub samples: Vec<SampleCoefficients>,
}

impl SolveResult {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Angles of attack [rad].
    pub fn angles(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.angle_of_attack).collect()
    }

    pub fn lift(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.lift).collect()
    }

    pub fn induced_drag(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.induced_drag).collect()
    }

    pub fn moment(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.moment).collect()
    }

    /// Lift coefficient of wing `tag` for every sample.
    pub fn wing_lift(&self, tag: &str) -> Option<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| s.wing(tag).map(|w| w.lift))
            .collect()
    }

    pub fn wing_induced_drag(&self, tag: &str) -> Option<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| s.wing(tag).map(|w| w.induced_drag))
            .collect()
    }
}

/// Integrate solved circulation into coefficients.
///
/// Lift uses the Kutta–Joukowski force with the streamwise induced
/// perturbation `u`; induced drag uses the downwash `-w` with the π
/// normalization of lifting-line theory.
pub(crate) fn integrate(
    geometry: &PanelGeometry,
    settings: &VlmSettings,
    alpha: f64,
    matrix: &InfluenceMatrix,
    circulation: &DVector<f64>,
) -> SampleCoefficients {
    let panels = geometry.panels();
    let reference = &settings.reference;
    let u = &matrix.u * circulation;
    let w = &matrix.w * circulation;

    let mut lift_load = Vec::with_capacity(panels.len());
    let mut drag_load = Vec::with_capacity(panels.len());
    let mut moment = 0.0;
    for (i, panel) in panels.iter().enumerate() {
        let gamma_dy = circulation[i] * panel.span_width();
        lift_load.push(2.0 * (1.0 + u[i]) * gamma_dy);
        drag_load.push(-2.0 * w[i] * gamma_dy / PI);
        moment += 2.0 * (reference.moment_point.x - panel.hinge.x) * gamma_dy;
    }

    let wings = geometry
        .wings()
        .iter()
        .map(|layout| {
            let range = geometry.wing_panels(layout.id);
            let lift: f64 = lift_load[range.clone()].iter().sum();
            let drag: f64 = drag_load[range].iter().sum();
            WingCoefficients {
                id: layout.id,
                tag: layout.tag.clone(),
                lift: lift / layout.area,
                induced_drag: drag / layout.area,
            }
        })
        .collect();

    let sections = (0..geometry.strip_count())
        .map(|strip| {
            let range = geometry.strip_panels(strip);
            let first = &panels[range.start];
            let strip_area = first.strip_chord * first.span_width();
            let lift: f64 = lift_load[range.clone()].iter().sum();
            let drag: f64 = drag_load[range].iter().sum();
            SectionCoefficients {
                wing: first.wing,
                strip,
                y: first.collocation.y,
                lift: lift / strip_area,
                induced_drag: drag / strip_area,
            }
        })
        .collect();

    SampleCoefficients {
        angle_of_attack: alpha,
        lift: lift_load.iter().sum::<f64>() / reference.area,
        induced_drag: drag_load.iter().sum::<f64>() / reference.area,
        moment: moment / (reference.area * reference.chord),
        wings,
        sections,
        circulation: circulation.iter().copied().collect(),
    }
}
