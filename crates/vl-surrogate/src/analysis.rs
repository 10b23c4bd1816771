//! Create, train once, evaluate many times.

use vl_core::Angle;
use vl_geometry::PanelGeometry;
use vl_solver::VlmSettings;

use crate::error::{SurrogateError, SurrogateResult};
use crate::grid::TrainingGrid;
use crate::model::{EnvelopePolicy, SurrogateOutput, TrainedSurrogate, train};

/// Vortex-lattice aerodynamics analysis owning its surrogate.
///
/// The surrogate is the only state kept between evaluations. It is written
/// once by [`VortexLatticeAnalysis::train`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct VortexLatticeAnalysis {
    geometry: PanelGeometry,
    settings: VlmSettings,
    grid: TrainingGrid,
    envelope: EnvelopePolicy,
    surrogate: Option<TrainedSurrogate>,
}

impl VortexLatticeAnalysis {
    pub fn new(geometry: PanelGeometry, settings: VlmSettings) -> Self {
        Self {
            geometry,
            settings,
            grid: TrainingGrid::default(),
            envelope: EnvelopePolicy::default(),
            surrogate: None,
        }
    }

    pub fn with_grid(mut self, grid: TrainingGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopePolicy) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn settings(&self) -> &VlmSettings {
        &self.settings
    }

    pub fn grid(&self) -> &TrainingGrid {
        &self.grid
    }

    pub fn is_trained(&self) -> bool {
        self.surrogate.is_some()
    }

    pub fn surrogate(&self) -> Option<&TrainedSurrogate> {
        self.surrogate.as_ref()
    }

    /// Run the training sweep and freeze the surrogate.
    pub fn train(&mut self) -> SurrogateResult<&TrainedSurrogate> {
        if self.surrogate.is_some() {
            return Err(SurrogateError::AlreadyTrained);
        }
        tracing::debug!(
            grid = self.grid.len(),
            wings = self.geometry.wings().len(),
            "training vortex lattice surrogate"
        );
        let model = train(&self.geometry, &self.settings, &self.grid)?.with_envelope(self.envelope);
        let frozen: &TrainedSurrogate = self.surrogate.insert(model);
        Ok(frozen)
    }

    pub fn evaluate(&self, angle: Angle) -> SurrogateResult<SurrogateOutput> {
        self.trained()?.evaluate(angle)
    }

    pub fn evaluate_many(&self, angles: &[Angle]) -> SurrogateResult<Vec<SurrogateOutput>> {
        self.trained()?.evaluate_many(angles)
    }

    pub fn into_surrogate(self) -> SurrogateResult<TrainedSurrogate> {
        self.surrogate.ok_or(SurrogateError::NotTrained)
    }

    fn trained(&self) -> SurrogateResult<&TrainedSurrogate> {
        self.surrogate.as_ref().ok_or(SurrogateError::NotTrained)
    }
}
