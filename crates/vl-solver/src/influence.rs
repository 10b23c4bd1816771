//! Horseshoe-vortex influence coefficients.
//!
//! Every panel carries a horseshoe vortex that enters from infinity along the
//! wake, runs upstream along the `a` edge of its strip to the panel's bound
//! vortex, crosses the quarter-chord line and leaves again along the `b` edge.
//! The pieces are:
//!
//! 1. bound segment `ah → bh`
//! 2. split legs `a2 → ah` and `bh → b2` inside the panel itself
//! 3. whole-panel legs `a2 → a1` and `b1 → b2` of every panel further aft in the same strip
//! 4. semi-infinite legs from the strip trailing edge, aligned with the freestream
//!
//! Pieces 1–3 do not depend on the angle of attack and are assembled once; only
//! the wake legs are evaluated per sample.

use nalgebra::{DMatrix, Unit, Vector3};
use rayon::prelude::*;
use vl_geometry::{Panel, PanelGeometry};

use crate::error::{SolverError, SolverResult};
use crate::kernel::{KernelError, segment_velocity, semi_infinite_velocity};
use crate::settings::{FlowState, VlmSettings};

/// Induced velocity components for one angle of attack.
///
/// Rows are collocation points, columns are panels (unit circulation).
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMatrix {
    pub u: DMatrix<f64>,
    pub v: DMatrix<f64>,
    pub w: DMatrix<f64>,
}

impl InfluenceMatrix {
    fn zeros(n: usize) -> Self {
        Self {
            u: DMatrix::zeros(n, n),
            v: DMatrix::zeros(n, n),
            w: DMatrix::zeros(n, n),
        }
    }

    fn from_rows(rows: &[Vec<Vector3<f64>>]) -> Self {
        let n = rows.len();
        let mut m = Self::zeros(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, vel) in row.iter().enumerate() {
                m.add(i, j, vel);
            }
        }
        m
    }

    fn add(&mut self, i: usize, j: usize, vel: &Vector3<f64>) {
        self.u[(i, j)] += vel.x;
        self.v[(i, j)] += vel.y;
        self.w[(i, j)] += vel.z;
    }

    /// Velocity at collocation point `i` induced by a unit vortex on panel `j`.
    pub fn velocity(&self, i: usize, j: usize) -> Vector3<f64> {
        Vector3::new(self.u[(i, j)], self.v[(i, j)], self.w[(i, j)])
    }

    pub fn size(&self) -> usize {
        self.u.nrows()
    }
}

/// Influence coefficients for a batch of angles: `[sample × collocation × panel × 3]`.
#[derive(Debug, Clone)]
pub struct InfluenceTensor {
    angles: Vec<f64>,
    matrices: Vec<InfluenceMatrix>,
}

impl InfluenceTensor {
    /// Angles of attack [rad], one per sample.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn samples(&self) -> usize {
        self.matrices.len()
    }

    pub fn matrix(&self, sample: usize) -> &InfluenceMatrix {
        &self.matrices[sample]
    }

    pub fn matrices(&self) -> &[InfluenceMatrix] {
        &self.matrices
    }

    pub fn velocity(&self, sample: usize, collocation: usize, panel: usize) -> Vector3<f64> {
        self.matrices[sample].velocity(collocation, panel)
    }
}

/// Horseshoe corners with the port-side edge swap applied.
#[derive(Debug, Clone, Copy)]
struct Horseshoe {
    a1: Vector3<f64>,
    b1: Vector3<f64>,
    ah: Vector3<f64>,
    bh: Vector3<f64>,
    a2: Vector3<f64>,
    b2: Vector3<f64>,
}

impl Horseshoe {
    fn from_panel(panel: &Panel) -> Self {
        let hs = Self {
            a1: panel.a1,
            b1: panel.b1,
            ah: panel.ah,
            bh: panel.bh,
            a2: panel.a2,
            b2: panel.b2,
        };
        // Bound vortices always run toward starboard so circulation keeps one sign.
        if panel.runs_to_port() {
            Self {
                a1: hs.b1,
                b1: hs.a1,
                ah: hs.bh,
                bh: hs.ah,
                a2: hs.b2,
                b2: hs.a2,
            }
        } else {
            hs
        }
    }
}

fn kernel_error(
    collocation: usize,
    panel: usize,
    segment: &'static str,
) -> impl FnOnce(KernelError) -> SolverError {
    move |source| SolverError::Kernel {
        collocation,
        panel,
        segment,
        source,
    }
}

fn wake_error(
    sample: usize,
    alpha: f64,
    collocation: usize,
    panel: usize,
    segment: &'static str,
) -> impl FnOnce(KernelError) -> SolverError {
    move |source| SolverError::WakeKernel {
        sample,
        angle_deg: alpha.to_degrees(),
        collocation,
        panel,
        segment,
        source,
    }
}

/// Angle-independent influence of a lattice, ready to be completed per angle.
///
/// Building it can fail only for problems shared by every angle of attack;
/// wake-leg failures belong to the sample that produced them.
#[derive(Debug, Clone)]
pub struct LatticeInfluence<'a> {
    geometry: &'a PanelGeometry,
    horseshoes: Vec<Horseshoe>,
    fixed: InfluenceMatrix,
}

impl<'a> LatticeInfluence<'a> {
    /// Validate `settings` against `geometry` and assemble the fixed part.
    pub fn new(geometry: &'a PanelGeometry, settings: &VlmSettings) -> SolverResult<Self> {
        settings.validate()?;
        geometry.check_settings(settings.spanwise_panels, settings.chordwise_panels)?;

        let horseshoes: Vec<Horseshoe> = geometry.panels().iter().map(Horseshoe::from_panel).collect();
        let fixed = assemble_fixed(geometry, &horseshoes)?;
        Ok(Self {
            geometry,
            horseshoes,
            fixed,
        })
    }

    /// Bound segments, split legs and accumulated panel legs.
    pub fn fixed(&self) -> &InfluenceMatrix {
        &self.fixed
    }

    /// Full influence matrix of sample `sample` at angle of attack `alpha` [rad].
    pub fn at_angle(&self, sample: usize, alpha: f64) -> SolverResult<InfluenceMatrix> {
        let mut matrix = self.fixed.clone();
        add_wake_legs(&mut matrix, self.geometry, &self.horseshoes, sample, alpha)?;
        Ok(matrix)
    }
}

/// Assemble the influence tensor for every angle in `flow`.
///
/// Geometry/settings mismatches are reported before any kernel is evaluated.
/// Any failing angle fails the whole tensor; use [`LatticeInfluence`] to keep
/// samples apart.
pub fn assemble_influence(
    geometry: &PanelGeometry,
    flow: &FlowState,
    settings: &VlmSettings,
) -> SolverResult<InfluenceTensor> {
    flow.validate()?;
    let lattice = LatticeInfluence::new(geometry, settings)?;

    let matrices = flow
        .angles()
        .par_iter()
        .enumerate()
        .map(|(sample, &alpha)| lattice.at_angle(sample, alpha))
        .collect::<SolverResult<Vec<_>>>()?;

    tracing::debug!(
        samples = matrices.len(),
        panels = geometry.len(),
        "influence tensor assembled"
    );

    Ok(InfluenceTensor {
        angles: flow.angles().to_vec(),
        matrices,
    })
}

/// Angle-independent part: bound segments, split legs and the chordwise
/// accumulation of whole-panel legs within each strip.
fn assemble_fixed(geometry: &PanelGeometry, horseshoes: &[Horseshoe]) -> SolverResult<InfluenceMatrix> {
    let panels = geometry.panels();
    let n = panels.len();

    let rows = (0..n)
        .into_par_iter()
        .map(|i| -> SolverResult<Vec<Vector3<f64>>> {
            let x = &panels[i].collocation;
            let mut row = Vec::with_capacity(n);
            let mut whole_legs = Vec::with_capacity(n);

            for (j, hs) in horseshoes.iter().enumerate() {
                let bound = segment_velocity(x, &hs.ah, &hs.bh)
                    .map_err(kernel_error(i, j, "bound vortex"))?;
                let left = segment_velocity(x, &hs.a2, &hs.ah)
                    .map_err(kernel_error(i, j, "left split leg"))?;
                let right = segment_velocity(x, &hs.bh, &hs.b2)
                    .map_err(kernel_error(i, j, "right split leg"))?;
                row.push(bound + left + right);

                let whole_left = segment_velocity(x, &hs.a2, &hs.a1)
                    .map_err(kernel_error(i, j, "left panel leg"))?;
                let whole_right = segment_velocity(x, &hs.b1, &hs.b2)
                    .map_err(kernel_error(i, j, "right panel leg"))?;
                whole_legs.push(whole_left + whole_right);
            }

            // Each panel also owns the legs of every panel aft of it in its strip:
            // a reverse running sum over the chordwise rows.
            for strip in 0..geometry.strip_count() {
                let mut downstream = Vector3::zeros();
                for j in geometry.strip_panels(strip).rev() {
                    row[j] += downstream;
                    downstream += whole_legs[j];
                }
            }
            Ok(row)
        })
        .collect::<SolverResult<Vec<_>>>()?;

    Ok(InfluenceMatrix::from_rows(&rows))
}

/// Add the two semi-infinite wake legs leaving each strip's trailing edge.
fn add_wake_legs(
    matrix: &mut InfluenceMatrix,
    geometry: &PanelGeometry,
    horseshoes: &[Horseshoe],
    sample: usize,
    alpha: f64,
) -> SolverResult<()> {
    let wake = Unit::new_normalize(Vector3::new(alpha.cos(), 0.0, alpha.sin()));
    let panels = geometry.panels();

    for (i, panel) in panels.iter().enumerate() {
        let x = &panel.collocation;
        for strip in 0..geometry.strip_count() {
            let range = geometry.strip_panels(strip);
            let last = range.end - 1;
            let trailing = &horseshoes[last];

            let inbound = semi_infinite_velocity(x, &trailing.a2, &wake)
                .map_err(wake_error(sample, alpha, i, last, "left wake leg"))?;
            let outbound = semi_infinite_velocity(x, &trailing.b2, &wake)
                .map_err(wake_error(sample, alpha, i, last, "right wake leg"))?;
            let legs = outbound - inbound;

            for j in range {
                matrix.add(i, j, &legs);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReferenceValues;
    use vl_core::{m, m2};
    use vl_geometry::{WingPlanform, discretize};

    fn settings(spanwise: usize, chordwise: usize) -> VlmSettings {
        VlmSettings::new(ReferenceValues::new(m2(8.0), m(1.0), Vector3::zeros()))
            .with_panels(spanwise, chordwise)
    }

    #[test]
    fn tensor_shape_matches_batch() {
        let wing = WingPlanform::rectangular("w", m(8.0), m(1.0));
        let geometry = discretize(&[wing], 4, 2).unwrap();
        let flow = FlowState::from_degrees(&[-4.0, 0.0, 4.0]);
        let tensor = assemble_influence(&geometry, &flow, &settings(4, 2)).unwrap();

        assert_eq!(tensor.samples(), 3);
        assert_eq!(tensor.matrix(0).size(), 16);
        assert_eq!(tensor.angles().len(), 3);
    }

    #[test]
    fn self_influence_is_downwash() {
        let wing = WingPlanform::rectangular("w", m(8.0), m(1.0));
        let geometry = discretize(&[wing], 4, 1).unwrap();
        let flow = FlowState::from_degrees(&[3.0]);
        let tensor = assemble_influence(&geometry, &flow, &settings(4, 1)).unwrap();
        for i in 0..geometry.len() {
            assert!(tensor.velocity(0, i, i).z < 0.0);
        }
    }

    #[test]
    fn mirrored_panels_induce_mirrored_velocities() {
        let wing = WingPlanform::rectangular("w", m(6.0), m(1.0));
        let geometry = discretize(&[wing], 3, 1).unwrap();
        let flow = FlowState::from_degrees(&[5.0]);
        let tensor = assemble_influence(&geometry, &flow, &settings(3, 1)).unwrap();
        let m = tensor.matrix(0);
        for i in 0..3 {
            for j in 0..3 {
                // starboard i/j ↔ port i+3/j+3
                assert!((m.w[(i, j)] - m.w[(i + 3, j + 3)]).abs() < 1e-12);
                assert!((m.u[(i, j)] - m.u[(i + 3, j + 3)]).abs() < 1e-12);
                assert!((m.v[(i, j)] + m.v[(i + 3, j + 3)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn single_row_ignores_panel_leg_accumulation() {
        // With one chordwise row there is nothing aft of any panel, so the
        // fixed part is exactly bound vortex plus split legs.
        let wing = WingPlanform::rectangular("w", m(4.0), m(1.0));
        let geometry = discretize(&[wing], 2, 1).unwrap();
        let hs: Vec<Horseshoe> = geometry.panels().iter().map(Horseshoe::from_panel).collect();
        let fixed = assemble_fixed(&geometry, &hs).unwrap();

        let x = geometry.panels()[1].collocation;
        let h = hs[0];
        let expected = segment_velocity(&x, &h.ah, &h.bh).unwrap()
            + segment_velocity(&x, &h.a2, &h.ah).unwrap()
            + segment_velocity(&x, &h.bh, &h.b2).unwrap();
        assert!((fixed.velocity(1, 0) - expected).norm() < 1e-14);
    }

    #[test]
    fn leading_row_collects_legs_of_aft_rows() {
        let wing = WingPlanform::rectangular("w", m(4.0), m(1.0));
        let geometry = discretize(&[wing], 1, 3).unwrap();
        let hs: Vec<Horseshoe> = geometry.panels().iter().map(Horseshoe::from_panel).collect();
        let fixed = assemble_fixed(&geometry, &hs).unwrap();

        let x = geometry.panels()[4].collocation;
        let own = |h: &Horseshoe| {
            segment_velocity(&x, &h.ah, &h.bh).unwrap()
                + segment_velocity(&x, &h.a2, &h.ah).unwrap()
                + segment_velocity(&x, &h.bh, &h.b2).unwrap()
        };
        let legs = |h: &Horseshoe| {
            segment_velocity(&x, &h.a2, &h.a1).unwrap() + segment_velocity(&x, &h.b1, &h.b2).unwrap()
        };

        // panel 0 is the leading row of strip 0 (rows 0,1,2)
        let expected_front = own(&hs[0]) + legs(&hs[1]) + legs(&hs[2]);
        let expected_mid = own(&hs[1]) + legs(&hs[2]);
        let expected_aft = own(&hs[2]);
        assert!((fixed.velocity(4, 0) - expected_front).norm() < 1e-13);
        assert!((fixed.velocity(4, 1) - expected_mid).norm() < 1e-13);
        assert!((fixed.velocity(4, 2) - expected_aft).norm() < 1e-13);
    }

    #[test]
    fn lattice_matches_tensor_per_angle() {
        let wing = WingPlanform::rectangular("w", m(6.0), m(1.0));
        let geometry = discretize(&[wing], 3, 2).unwrap();
        let flow = FlowState::from_degrees(&[-3.0, 6.0]);
        let tensor = assemble_influence(&geometry, &flow, &settings(3, 2)).unwrap();
        let lattice = LatticeInfluence::new(&geometry, &settings(3, 2)).unwrap();

        for (sample, &alpha) in flow.angles().iter().enumerate() {
            let matrix = lattice.at_angle(sample, alpha).unwrap();
            assert_eq!(&matrix, tensor.matrix(sample));
        }
    }

    #[test]
    fn mismatched_settings_fail_before_assembly() {
        let wing = WingPlanform::rectangular("w", m(8.0), m(1.0));
        let geometry = discretize(&[wing], 4, 1).unwrap();
        let flow = FlowState::from_degrees(&[2.0]);
        let err = assemble_influence(&geometry, &flow, &settings(4, 2)).unwrap_err();
        assert!(matches!(err, SolverError::Geometry(_)));
    }
}
