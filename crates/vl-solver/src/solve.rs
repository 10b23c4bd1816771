//! Batched flow-tangency solve.
//!
//! Each angle-of-attack sample is an independent linear system `A·Γ = b`.
//! Samples are solved in parallel and succeed or fail on their own.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use vl_geometry::PanelGeometry;

use crate::aic::FlowTangency;
use crate::coefficients::{SampleCoefficients, SolveResult, integrate};
use crate::error::{SolverError, SolverResult};
use crate::influence::{InfluenceMatrix, LatticeInfluence};
use crate::settings::{FlowState, VlmSettings};

/// Smallest accepted ratio between the smallest and largest LU pivot magnitudes.
pub const MIN_PIVOT_RATIO: f64 = 1e-12;

/// Solve every sample in `flow`, reporting success or failure per sample.
///
/// The outer result fails only for problems shared by all samples (invalid
/// settings or flow, geometry mismatch, degenerate bound or trailing legs).
/// Wake legs follow the angle of attack, so their failures stay with the sample.
pub fn solve_samples(
    flow: &FlowState,
    geometry: &PanelGeometry,
    settings: &VlmSettings,
) -> SolverResult<Vec<SolverResult<SampleCoefficients>>> {
    flow.validate()?;
    let lattice = LatticeInfluence::new(geometry, settings)?;
    let tangency = FlowTangency::from_geometry(geometry);

    tracing::info!(
        samples = flow.len(),
        panels = geometry.len(),
        wings = geometry.wings().len(),
        "solving vortex lattice"
    );

    let results: Vec<SolverResult<SampleCoefficients>> = flow
        .angles()
        .par_iter()
        .enumerate()
        .map(|(sample, &alpha)| {
            let matrix = lattice.at_angle(sample, alpha)?;
            solve_sample(sample, alpha, &matrix, &tangency, geometry, settings)
        })
        .collect();

    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        tracing::warn!(error = %err, "sample failed");
    }
    Ok(results)
}

/// Solve every sample in `flow`, failing on the first failed sample.
pub fn solve(
    flow: &FlowState,
    geometry: &PanelGeometry,
    settings: &VlmSettings,
) -> SolverResult<SolveResult> {
    let samples = solve_samples(flow, geometry, settings)?
        .into_iter()
        .collect::<SolverResult<Vec<_>>>()?;
    Ok(SolveResult { samples })
}

fn solve_sample(
    sample: usize,
    alpha: f64,
    matrix: &InfluenceMatrix,
    tangency: &FlowTangency,
    geometry: &PanelGeometry,
    settings: &VlmSettings,
) -> SolverResult<SampleCoefficients> {
    let aic = tangency.influence_coefficients(matrix);
    let rhs = tangency.freestream_rhs(alpha);
    let circulation = solve_linear(sample, alpha, aic, &rhs)?;
    if circulation.iter().any(|g| !g.is_finite()) {
        return Err(SolverError::NonFinite {
            sample,
            what: "circulation",
        });
    }

    let coefficients = integrate(geometry, settings, alpha, matrix, &circulation);
    if !(coefficients.lift.is_finite()
        && coefficients.induced_drag.is_finite()
        && coefficients.moment.is_finite())
    {
        return Err(SolverError::NonFinite {
            sample,
            what: "force coefficients",
        });
    }

    tracing::debug!(
        sample,
        alpha_deg = alpha.to_degrees(),
        cl = coefficients.lift,
        cdi = coefficients.induced_drag,
        "sample solved"
    );
    Ok(coefficients)
}

/// LU solve with a pivot check so near-singular systems fail loudly.
fn solve_linear(
    sample: usize,
    alpha: f64,
    aic: DMatrix<f64>,
    rhs: &DVector<f64>,
) -> SolverResult<DVector<f64>> {
    let angle_deg = alpha.to_degrees();
    let singular = SolverError::SingularSystem { sample, angle_deg };

    let lu = aic.lu();
    let pivots = lu.u().diagonal();
    let largest = pivots.iter().fold(0.0_f64, |m, p| m.max(p.abs()));
    let smallest = pivots.iter().fold(f64::INFINITY, |m, p| m.min(p.abs()));
    if smallest == 0.0 || !largest.is_finite() {
        return Err(singular);
    }

    let pivot_ratio = smallest / largest;
    if pivot_ratio < MIN_PIVOT_RATIO {
        return Err(SolverError::IllConditioned {
            sample,
            angle_deg,
            pivot_ratio,
        });
    }

    lu.solve(rhs).ok_or(singular)
}
