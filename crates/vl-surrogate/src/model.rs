//! Trained surrogate model: training table, fits and evaluation.

use serde::{Deserialize, Serialize};
use vl_core::{Angle, radians};
use vl_geometry::PanelGeometry;
use vl_solver::{FlowState, SolveResult, VlmSettings};

use crate::error::{SurrogateError, SurrogateResult};
use crate::fit::LinearFit;
use crate::grid::TrainingGrid;

/// Behaviour for query angles outside the training grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopePolicy {
    /// Evaluate the fitted lines as they are
    #[default]
    Extrapolate,
    /// Hold the query angle to the nearest grid bound
    Clamp,
}

/// Solver samples of one wing over the training grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingTraining {
    pub tag: String,
    pub lift: Vec<f64>,
    pub induced_drag: Vec<f64>,
}

/// Solver output at every training angle, one entry per grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    /// Angles of attack [rad]
    pub angles: Vec<f64>,
    pub lift: Vec<f64>,
    pub induced_drag: Vec<f64>,
    pub wings: Vec<WingTraining>,
}

impl TrainingData {
    /// Tabulate a batched solve. Wings follow the geometry's declaration order.
    pub fn from_solve(geometry: &PanelGeometry, result: &SolveResult) -> Self {
        let wings = geometry
            .wings()
            .iter()
            .enumerate()
            .map(|(k, layout)| WingTraining {
                tag: layout.tag.clone(),
                lift: result.samples.iter().map(|s| s.wings[k].lift).collect(),
                induced_drag: result.samples.iter().map(|s| s.wings[k].induced_drag).collect(),
            })
            .collect();

        Self {
            angles: result.angles(),
            lift: result.lift(),
            induced_drag: result.induced_drag(),
            wings,
        }
    }

    pub fn wing(&self, tag: &str) -> Option<&WingTraining> {
        self.wings.iter().find(|w| w.tag == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingFit {
    pub tag: String,
    pub lift: LinearFit,
}

/// Lift of one wing at a query angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingLift {
    pub tag: String,
    pub lift: f64,
}

/// Surrogate prediction at one angle of attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurrogateOutput {
    /// Query angle of attack [rad] as requested, before any clamping
    pub angle_of_attack: f64,
    pub lift: f64,
    pub induced_drag: f64,
    pub wings: Vec<WingLift>,
}

impl SurrogateOutput {
    pub fn wing(&self, tag: &str) -> Option<f64> {
        self.wings.iter().find(|w| w.tag == tag).map(|w| w.lift)
    }
}

/// Frozen linear surrogate. Evaluation never mutates it.
///
/// A deserialized model is refitted from its training table, so a stored file
/// that could not have come out of training is rejected on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSurrogate")]
pub struct TrainedSurrogate {
    training: TrainingData,
    lift: LinearFit,
    induced_drag: LinearFit,
    wings: Vec<WingFit>,
    envelope: EnvelopePolicy,
}

/// On-disk form of [`TrainedSurrogate`]; the stored fits are recomputed.
#[derive(Deserialize)]
struct StoredSurrogate {
    training: TrainingData,
    #[serde(default)]
    envelope: EnvelopePolicy,
}

impl TryFrom<StoredSurrogate> for TrainedSurrogate {
    type Error = SurrogateError;

    fn try_from(stored: StoredSurrogate) -> SurrogateResult<Self> {
        Self::from_training(stored.training, stored.envelope)
    }
}

impl TrainedSurrogate {
    /// Fit total lift, total induced drag and per-wing lift against angle of attack.
    pub fn from_training(training: TrainingData, envelope: EnvelopePolicy) -> SurrogateResult<Self> {
        let x = &training.angles;
        if x.iter().any(|a| a.abs() >= std::f64::consts::FRAC_PI_2) {
            return Err(SurrogateError::InvalidGrid {
                what: "training angles must be within +/-90 degrees",
            });
        }
        let lift = LinearFit::least_squares("lift coefficient", x, &training.lift)?;
        let induced_drag =
            LinearFit::least_squares("induced drag coefficient", x, &training.induced_drag)?;
        let wings = training
            .wings
            .iter()
            .map(|w| {
                Ok(WingFit {
                    tag: w.tag.clone(),
                    lift: LinearFit::least_squares("wing lift coefficient", x, &w.lift)?,
                })
            })
            .collect::<SurrogateResult<Vec<_>>>()?;

        tracing::info!(
            samples = x.len(),
            cl_alpha = lift.slope,
            cl_0 = lift.intercept,
            cl_rms = lift.residual_rms,
            cdi_rms = induced_drag.residual_rms,
            "surrogate trained"
        );

        Ok(Self {
            training,
            lift,
            induced_drag,
            wings,
            envelope,
        })
    }

    pub fn with_envelope(mut self, envelope: EnvelopePolicy) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn envelope(&self) -> EnvelopePolicy {
        self.envelope
    }

    pub fn training(&self) -> &TrainingData {
        &self.training
    }

    pub fn lift_fit(&self) -> &LinearFit {
        &self.lift
    }

    pub fn induced_drag_fit(&self) -> &LinearFit {
        &self.induced_drag
    }

    pub fn wing_fits(&self) -> &[WingFit] {
        &self.wings
    }

    pub fn wing_lift_fit(&self, tag: &str) -> Option<&LinearFit> {
        self.wings.iter().find(|w| w.tag == tag).map(|w| &w.lift)
    }

    pub fn evaluate(&self, angle: Angle) -> SurrogateResult<SurrogateOutput> {
        self.evaluate_radians(radians(angle))
    }

    pub fn evaluate_radians(&self, alpha: f64) -> SurrogateResult<SurrogateOutput> {
        if !alpha.is_finite() {
            return Err(SurrogateError::InvalidQuery { value: alpha });
        }
        let x = match self.envelope {
            EnvelopePolicy::Extrapolate => alpha,
            EnvelopePolicy::Clamp => self.clamp(alpha),
        };

        Ok(SurrogateOutput {
            angle_of_attack: alpha,
            lift: self.lift.evaluate(x),
            induced_drag: self.induced_drag.evaluate(x),
            wings: self
                .wings
                .iter()
                .map(|w| WingLift {
                    tag: w.tag.clone(),
                    lift: w.lift.evaluate(x),
                })
                .collect(),
        })
    }

    pub fn evaluate_many(&self, angles: &[Angle]) -> SurrogateResult<Vec<SurrogateOutput>> {
        angles.iter().map(|a| self.evaluate(*a)).collect()
    }

    /// Fitting guarantees at least two distinct finite angles, so `lo < hi`.
    fn clamp(&self, alpha: f64) -> f64 {
        let angles = &self.training.angles;
        let lo = angles.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = angles.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        alpha.max(lo).min(hi)
    }
}

/// Solve the lattice at every grid angle and fit the surrogate.
pub fn train(
    geometry: &PanelGeometry,
    settings: &VlmSettings,
    grid: &TrainingGrid,
) -> SurrogateResult<TrainedSurrogate> {
    grid.validate()?;
    let flow = FlowState::from_radians(grid.angles().to_vec());
    let result = vl_solver::solve(&flow, geometry, settings)?;
    let training = TrainingData::from_solve(geometry, &result);
    TrainedSurrogate::from_training(training, EnvelopePolicy::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TrainingData {
        let angles: Vec<f64> = [-10.0_f64, 0.0, 10.0].iter().map(|a| a.to_radians()).collect();
        TrainingData {
            lift: angles.iter().map(|a| 0.1 + 5.0 * a).collect(),
            induced_drag: angles.iter().map(|a| 0.5 * a * a).collect(),
            wings: vec![WingTraining {
                tag: "main_wing".into(),
                lift: angles.iter().map(|a| 4.0 * a).collect(),
                induced_drag: vec![0.0; 3],
            }],
            angles,
        }
    }

    #[test]
    fn evaluates_fitted_lines() {
        let model = TrainedSurrogate::from_training(table(), EnvelopePolicy::Extrapolate).unwrap();
        let alpha = 4.0_f64.to_radians();
        let out = model.evaluate_radians(alpha).unwrap();
        assert!((out.lift - (0.1 + 5.0 * alpha)).abs() < 1e-12);
        assert!((out.wing("main_wing").unwrap() - 4.0 * alpha).abs() < 1e-12);
        assert!(out.wing("tail").is_none());
    }

    #[test]
    fn clamp_holds_to_grid_bounds() {
        let model = TrainedSurrogate::from_training(table(), EnvelopePolicy::Clamp).unwrap();
        let edge = model.evaluate_radians(10.0_f64.to_radians()).unwrap();
        let beyond = model.evaluate_radians(25.0_f64.to_radians()).unwrap();
        assert_eq!(edge.lift, beyond.lift);
        assert_eq!(edge.induced_drag, beyond.induced_drag);
        assert!((beyond.angle_of_attack - 25.0_f64.to_radians()).abs() < 1e-15);

        let model = model.with_envelope(EnvelopePolicy::Extrapolate);
        let extrapolated = model.evaluate_radians(25.0_f64.to_radians()).unwrap();
        assert!(extrapolated.lift > edge.lift);
    }

    #[test]
    fn rejects_non_finite_query() {
        let model = TrainedSurrogate::from_training(table(), EnvelopePolicy::default()).unwrap();
        assert!(matches!(
            model.evaluate_radians(f64::NAN),
            Err(SurrogateError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn loading_refits_and_rejects_empty_table() {
        let model = TrainedSurrogate::from_training(table(), EnvelopePolicy::Clamp).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: TrainedSurrogate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.envelope(), EnvelopePolicy::Clamp);
        assert!((back.lift_fit().slope - 5.0).abs() < 1e-9);

        let empty = r#"{
            "training": { "angles": [], "lift": [], "induced_drag": [], "wings": [] },
            "lift": { "intercept": 0.0, "slope": 1.0, "residual_rms": 0.0 },
            "induced_drag": { "intercept": 0.0, "slope": 0.0, "residual_rms": 0.0 },
            "wings": [],
            "envelope": "clamp"
        }"#;
        let err = serde_json::from_str::<TrainedSurrogate>(empty).unwrap_err();
        assert!(err.to_string().contains("at least two samples"), "{err}");
    }

    #[test]
    fn loading_rejects_mismatched_wing_samples() {
        let mut training = table();
        training.wings[0].lift.pop();
        let json = serde_json::json!({ "training": training, "envelope": "extrapolate" });
        assert!(serde_json::from_value::<TrainedSurrogate>(json).is_err());
    }

    #[test]
    fn envelope_policy_serializes_snake_case() {
        let json = serde_json::to_string(&EnvelopePolicy::Clamp).unwrap();
        assert_eq!(json, "\"clamp\"");
    }
}
