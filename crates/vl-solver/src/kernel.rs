//! Closed-form velocity induced by straight vortex filaments of unit strength.

use nalgebra::{Unit, Vector3};
use std::f64::consts::PI;
use thiserror::Error;

const INV_FOUR_PI: f64 = 1.0 / (4.0 * PI);

/// Evaluation points closer to the filament line than this fraction of the
/// filament length (or of the distance to its start) count as lying on the line.
/// They are rejected when they fall on the filament itself and induce nothing
/// when they fall on its extension.
const COLLINEAR_TOL: f64 = 1e-10;

/// Filaments shorter than this are rejected [m].
const MIN_FILAMENT_LENGTH: f64 = 1e-12;

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KernelError {
    #[error("filament has zero length")]
    DegenerateFilament,

    #[error("evaluation point is collinear with the filament")]
    Collinear,
}

/// Velocity induced at `point` by a unit-strength filament running from `start` to `end`.
///
/// ```text
/// V = (r1 × r2) / (4π |r1 × r2|²) · r0 · (r1/|r1| − r2/|r2|)
/// ```
pub fn segment_velocity(
    point: &Vector3<f64>,
    start: &Vector3<f64>,
    end: &Vector3<f64>,
) -> KernelResult<Vector3<f64>> {
    let r0 = end - start;
    let length_sq = r0.norm_squared();
    if length_sq < MIN_FILAMENT_LENGTH * MIN_FILAMENT_LENGTH {
        return Err(KernelError::DegenerateFilament);
    }

    let r1 = point - start;
    let r2 = point - end;
    let cross = r1.cross(&r2);
    let cross_sq = cross.norm_squared();
    // |r1 × r2| / |r0| is the distance from the point to the filament line
    if cross_sq <= (COLLINEAR_TOL * length_sq).powi(2) {
        let along = r0.dot(&r1);
        if (0.0..=length_sq).contains(&along) {
            return Err(KernelError::Collinear);
        }
        return Ok(Vector3::zeros());
    }

    let bracket = r0.dot(&r1) / r1.norm() - r0.dot(&r2) / r2.norm();
    Ok(cross * (INV_FOUR_PI * bracket / cross_sq))
}

/// Velocity induced at `point` by a unit-strength filament leaving `start` and
/// extending to infinity along `direction`.
///
/// ```text
/// V = (e × r1) / (4π |e × r1|²) · (1 + e·r1/|r1|)
/// ```
pub fn semi_infinite_velocity(
    point: &Vector3<f64>,
    start: &Vector3<f64>,
    direction: &Unit<Vector3<f64>>,
) -> KernelResult<Vector3<f64>> {
    let r1 = point - start;
    let r1_norm = r1.norm();
    if r1_norm < MIN_FILAMENT_LENGTH {
        return Err(KernelError::Collinear);
    }

    let cross = direction.cross(&r1);
    let cross_sq = cross.norm_squared();
    if cross_sq <= (COLLINEAR_TOL * r1_norm).powi(2) {
        // upstream of the start the filament induces nothing
        if direction.dot(&r1) >= 0.0 {
            return Err(KernelError::Collinear);
        }
        return Ok(Vector3::zeros());
    }

    let bracket = 1.0 + direction.dot(&r1) / r1_norm;
    Ok(cross * (INV_FOUR_PI * bracket / cross_sq))
}
