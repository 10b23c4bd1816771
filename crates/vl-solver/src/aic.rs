//! Flow-tangency boundary conditions and the aerodynamic influence coefficient matrix.

use nalgebra::{DMatrix, DVector, Vector3};
use vl_geometry::PanelGeometry;

use crate::influence::InfluenceMatrix;

/// Local surface orientation at every collocation point.
///
/// The (unnormalized) surface normal is `(-tan δ, -tan φ, 1)` where δ is the
/// chordwise slope (twist/camber) and φ the local dihedral.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTangency {
    slope: Vec<f64>,
    dihedral: Vec<f64>,
}

impl FlowTangency {
    /// Dihedral is taken from the leading row of each strip, whose leading
    /// edge is the wing's own and carries no twist.
    pub fn from_geometry(geometry: &PanelGeometry) -> Self {
        let panels = geometry.panels();
        let dihedral = (0..panels.len())
            .map(|i| {
                let leading = geometry.strip_panels(geometry.strip_of(i)).start;
                panels[leading].dihedral_tangent()
            })
            .collect();
        Self {
            slope: panels.iter().map(|p| p.slope_tangent()).collect(),
            dihedral,
        }
    }

    /// tan δ at collocation point `i`
    pub fn slope_tangent(&self, i: usize) -> f64 {
        self.slope[i]
    }

    /// tan φ at collocation point `i`
    pub fn dihedral_tangent(&self, i: usize) -> f64 {
        self.dihedral[i]
    }

    pub fn normal(&self, i: usize) -> Vector3<f64> {
        Vector3::new(-self.slope[i], -self.dihedral[i], 1.0)
    }

    pub fn len(&self) -> usize {
        self.slope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slope.is_empty()
    }

    /// Normal-velocity influence of each unit panel vortex on each collocation point.
    pub fn influence_coefficients(&self, matrix: &InfluenceMatrix) -> DMatrix<f64> {
        let n = matrix.size();
        DMatrix::from_fn(n, n, |i, j| {
            matrix.w[(i, j)] - matrix.u[(i, j)] * self.slope[i] - matrix.v[(i, j)] * self.dihedral[i]
        })
    }

    /// Freestream normal velocity to cancel at each collocation point.
    pub fn freestream_rhs(&self, alpha: f64) -> DVector<f64> {
        let (sin_a, cos_a) = alpha.sin_cos();
        DVector::from_iterator(self.len(), self.slope.iter().map(|t| t * cos_a - sin_a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vl_core::{deg, m};
    use vl_geometry::{WingPlanform, discretize};

    #[test]
    fn flat_wing_rhs_is_minus_sine_alpha() {
        let wing = WingPlanform::rectangular("w", m(6.0), m(1.0));
        let geometry = discretize(&[wing], 3, 1).unwrap();
        let tangency = FlowTangency::from_geometry(&geometry);
        let alpha = 4.0_f64.to_radians();
        let rhs = tangency.freestream_rhs(alpha);
        for value in rhs.iter() {
            assert!((value + alpha.sin()).abs() < 1e-15);
        }
    }

    #[test]
    fn twist_acts_as_extra_incidence() {
        let twist = 2.0_f64;
        let wing = WingPlanform::rectangular("w", m(6.0), m(1.0)).with_twist(deg(twist), deg(twist));
        let geometry = discretize(&[wing], 3, 1).unwrap();
        let tangency = FlowTangency::from_geometry(&geometry);
        let alpha = 3.0_f64.to_radians();
        let rhs = tangency.freestream_rhs(alpha);
        let t = twist.to_radians();
        // -(tan t cos a + sin a) = -sin(a + t) / cos t
        let expected = -(alpha + t).sin() / t.cos();
        for value in rhs.iter() {
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn spanwise_twist_leaves_dihedral_alone() {
        let wing = WingPlanform::rectangular("w", m(8.0), m(1.2))
            .with_tip_chord(m(0.6))
            .with_dihedral(deg(5.0))
            .with_twist(deg(4.0), deg(-2.0));
        let geometry = discretize(&[wing], 4, 3).unwrap();
        let tangency = FlowTangency::from_geometry(&geometry);
        let expected = 5.0_f64.to_radians().tan();
        for i in 0..geometry.len() {
            let tangent = tangency.dihedral_tangent(i);
            let side = geometry.panels()[i].collocation.y.signum();
            assert!((tangent - side * expected).abs() < 1e-12, "panel {i}: {tangent}");
        }
    }

    #[test]
    fn dihedral_tilts_normals_inboard() {
        let wing = WingPlanform::rectangular("w", m(6.0), m(1.0)).with_dihedral(deg(6.0));
        let geometry = discretize(&[wing], 3, 1).unwrap();
        let tangency = FlowTangency::from_geometry(&geometry);
        // starboard normals lean to -y, port normals to +y
        assert!(tangency.normal(0).y < 0.0);
        assert!(tangency.normal(3).y > 0.0);
    }
}
