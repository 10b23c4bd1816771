//! Project schema definitions.

use serde::{Deserialize, Serialize};
use vl_surrogate::{EnvelopePolicy, TrainingGrid};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub reference: ReferenceDef,
    #[serde(default)]
    pub settings: DiscretizationDef,
    #[serde(default)]
    pub training: TrainingDef,
    pub wings: Vec<WingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDef {
    pub area_m2: f64,
    pub chord_m: f64,
    /// Moment reference point (aerodynamic center or center of gravity)
    pub moment_point_m: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscretizationDef {
    pub spanwise_panels: usize,
    pub chordwise_panels: usize,
}

impl Default for DiscretizationDef {
    fn default() -> Self {
        Self {
            spanwise_panels: vl_solver::VlmSettings::DEFAULT_SPANWISE_PANELS,
            chordwise_panels: vl_solver::VlmSettings::DEFAULT_CHORDWISE_PANELS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingDef {
    #[serde(default = "default_training_angles")]
    pub angles_deg: Vec<f64>,
    #[serde(default)]
    pub envelope: EnvelopePolicy,
}

impl Default for TrainingDef {
    fn default() -> Self {
        Self {
            angles_deg: default_training_angles(),
            envelope: EnvelopePolicy::default(),
        }
    }
}

fn default_training_angles() -> Vec<f64> {
    TrainingGrid::DEFAULT_DEGREES.to_vec()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WingDef {
    pub tag: String,
    /// Root leading edge in body axes (x aft, y starboard, z up)
    #[serde(default)]
    pub origin_m: [f64; 3],
    pub semi_span_m: f64,
    pub root_chord_m: f64,
    /// Defaults to the root chord
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_chord_m: Option<f64>,
    #[serde(default)]
    pub sweep_deg: f64,
    #[serde(default)]
    pub dihedral_deg: f64,
    #[serde(default)]
    pub root_twist_deg: f64,
    #[serde(default)]
    pub tip_twist_deg: f64,
    #[serde(default = "default_symmetric")]
    pub symmetric: bool,
}

fn default_symmetric() -> bool {
    true
}

impl WingDef {
    pub fn tip_chord(&self) -> f64 {
        self.tip_chord_m.unwrap_or(self.root_chord_m)
    }
}
