//! Conversion from the project document to solver and surrogate inputs.

use nalgebra::Vector3;
use vl_core::{deg, m, m2};
use vl_geometry::{PanelGeometry, WingPlanform, discretize};
use vl_solver::{ReferenceValues, VlmSettings};
use vl_surrogate::{TrainingGrid, VortexLatticeAnalysis};

use crate::ProjectResult;
use crate::schema::{Project, WingDef};

impl WingDef {
    pub fn to_planform(&self) -> WingPlanform {
        let [x, y, z] = self.origin_m;
        let span = m(2.0 * self.semi_span_m);
        let planform = WingPlanform::rectangular(self.tag.clone(), span, m(self.root_chord_m))
            .with_origin(x, y, z)
            .with_tip_chord(m(self.tip_chord()))
            .with_sweep(deg(self.sweep_deg))
            .with_dihedral(deg(self.dihedral_deg))
            .with_twist(deg(self.root_twist_deg), deg(self.tip_twist_deg));
        if self.symmetric { planform } else { planform.one_sided() }
    }
}

impl Project {
    pub fn planforms(&self) -> Vec<WingPlanform> {
        self.wings.iter().map(WingDef::to_planform).collect()
    }

    pub fn reference_values(&self) -> ReferenceValues {
        let [x, y, z] = self.reference.moment_point_m;
        ReferenceValues::new(
            m2(self.reference.area_m2),
            m(self.reference.chord_m),
            Vector3::new(x, y, z),
        )
    }

    pub fn vlm_settings(&self) -> VlmSettings {
        VlmSettings::new(self.reference_values())
            .with_panels(self.settings.spanwise_panels, self.settings.chordwise_panels)
    }

    pub fn training_grid(&self) -> TrainingGrid {
        TrainingGrid::from_degrees(&self.training.angles_deg)
    }

    /// Discretize every wing with the project's panel counts.
    pub fn geometry(&self) -> ProjectResult<PanelGeometry> {
        Ok(discretize(
            &self.planforms(),
            self.settings.spanwise_panels,
            self.settings.chordwise_panels,
        )?)
    }

    /// Untrained analysis configured from this project.
    pub fn analysis(&self) -> ProjectResult<VortexLatticeAnalysis> {
        Ok(VortexLatticeAnalysis::new(self.geometry()?, self.vlm_settings())
            .with_grid(self.training_grid())
            .with_envelope(self.training.envelope))
    }
}
