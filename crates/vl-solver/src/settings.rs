//! Discretization settings, reference values and flow conditions.

use nalgebra::Vector3;
use vl_core::{Angle, Area, Length, meters, radians, square_meters};

use crate::error::{SolverError, SolverResult};

/// Reference quantities used to non-dimensionalize forces and moments.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceValues {
    /// Aircraft reference area [m^2]
    pub area: f64,
    /// Reference chord for the moment coefficient [m]
    pub chord: f64,
    /// Moment reference point (aerodynamic center or center of gravity) in body axes [m].
    /// Only its streamwise coordinate enters the pitching moment.
    pub moment_point: Vector3<f64>,
}

impl ReferenceValues {
    pub fn new(area: Area, chord: Length, moment_point: Vector3<f64>) -> Self {
        Self {
            area: square_meters(area),
            chord: meters(chord),
            moment_point,
        }
    }
}

/// Immutable configuration for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct VlmSettings {
    /// Strips per semi-span
    pub spanwise_panels: usize,
    /// Rows per strip
    pub chordwise_panels: usize,
    pub reference: ReferenceValues,
}

impl VlmSettings {
    pub const DEFAULT_SPANWISE_PANELS: usize = 5;
    pub const DEFAULT_CHORDWISE_PANELS: usize = 1;

    /// Settings with the default (training sweep) discretization.
    pub fn new(reference: ReferenceValues) -> Self {
        Self {
            spanwise_panels: Self::DEFAULT_SPANWISE_PANELS,
            chordwise_panels: Self::DEFAULT_CHORDWISE_PANELS,
            reference,
        }
    }

    pub fn with_panels(mut self, spanwise: usize, chordwise: usize) -> Self {
        self.spanwise_panels = spanwise;
        self.chordwise_panels = chordwise;
        self
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.spanwise_panels == 0 {
            return Err(SolverError::InvalidSettings {
                what: "spanwise panel count must be at least 1",
            });
        }
        if self.chordwise_panels == 0 {
            return Err(SolverError::InvalidSettings {
                what: "chordwise panel count must be at least 1",
            });
        }
        if !(self.reference.area.is_finite() && self.reference.area > 0.0) {
            return Err(SolverError::InvalidSettings {
                what: "reference area must be positive",
            });
        }
        if !(self.reference.chord.is_finite() && self.reference.chord > 0.0) {
            return Err(SolverError::InvalidSettings {
                what: "reference chord must be positive",
            });
        }
        if !self.reference.moment_point.iter().all(|c| c.is_finite()) {
            return Err(SolverError::InvalidSettings {
                what: "moment reference point must be finite",
            });
        }
        Ok(())
    }
}

/// Batch of angle-of-attack samples solved together.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    angles: Vec<f64>,
}

impl FlowState {
    pub fn from_angles(angles: &[Angle]) -> Self {
        Self {
            angles: angles.iter().map(|a| radians(*a)).collect(),
        }
    }

    pub fn from_radians(angles: Vec<f64>) -> Self {
        Self { angles }
    }

    pub fn from_degrees(angles: &[f64]) -> Self {
        Self {
            angles: angles.iter().map(|a| a.to_radians()).collect(),
        }
    }

    pub fn single(angle: Angle) -> Self {
        Self::from_angles(&[angle])
    }

    /// Angles of attack [rad].
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.angles.is_empty() {
            return Err(SolverError::InvalidFlow {
                what: "at least one angle of attack is required",
            });
        }
        for alpha in &self.angles {
            if !alpha.is_finite() {
                return Err(SolverError::InvalidFlow {
                    what: "angle of attack must be finite",
                });
            }
            if alpha.abs() >= std::f64::consts::FRAC_PI_2 {
                return Err(SolverError::InvalidFlow {
                    what: "angle of attack must be within +/-90 degrees",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vl_core::{deg, m, m2};

    fn reference() -> ReferenceValues {
        ReferenceValues::new(m2(10.0), m(1.0), Vector3::new(0.25, 0.0, 0.0))
    }

    #[test]
    fn defaults_are_training_sweep_sized() {
        let settings = VlmSettings::new(reference());
        assert_eq!(settings.spanwise_panels, 5);
        assert_eq!(settings.chordwise_panels, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_zero_counts_and_bad_reference() {
        assert!(VlmSettings::new(reference()).with_panels(0, 1).validate().is_err());
        assert!(VlmSettings::new(reference()).with_panels(4, 0).validate().is_err());
        let mut settings = VlmSettings::new(reference());
        settings.reference.area = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn flow_state_converts_units() {
        let flow = FlowState::from_angles(&[deg(-5.0), deg(5.0)]);
        assert_eq!(flow.len(), 2);
        assert!((flow.angles()[1] - 5.0_f64.to_radians()).abs() < 1e-15);
        let plain = FlowState::from_degrees(&[-5.0, 5.0]);
        for (a, b) in plain.angles().iter().zip(flow.angles()) {
            assert!((a - b).abs() < 1e-15);
        }
    }

    #[test]
    fn flow_state_rejects_empty_and_non_finite() {
        assert!(FlowState::from_radians(vec![]).validate().is_err());
        assert!(FlowState::from_radians(vec![f64::NAN]).validate().is_err());
        assert!(FlowState::from_degrees(&[95.0]).validate().is_err());
    }
}
