//! Serializable run summaries.

use serde::Serialize;
use vl_solver::{SampleCoefficients, SolverResult};

#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub project: String,
    pub spanwise_panels: usize,
    pub chordwise_panels: usize,
    pub samples: Vec<SampleReport>,
}

#[derive(Debug, Serialize)]
pub struct SampleReport {
    pub alpha_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<CoefficientReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoefficientReport {
    pub cl: f64,
    pub cdi: f64,
    pub cm: f64,
    pub wings: Vec<WingReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Serialize)]
pub struct WingReport {
    pub tag: String,
    pub cl: f64,
    pub cdi: f64,
}

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub y_m: f64,
    pub cl: f64,
    pub cdi: f64,
}

impl SampleReport {
    pub fn new(alpha_deg: f64, result: &SolverResult<SampleCoefficients>, sections: bool) -> Self {
        match result {
            Ok(sample) => Self {
                alpha_deg,
                coefficients: Some(CoefficientReport::new(sample, sections)),
                error: None,
            },
            Err(err) => Self {
                alpha_deg,
                coefficients: None,
                error: Some(err.to_string()),
            },
        }
    }
}

impl CoefficientReport {
    fn new(sample: &SampleCoefficients, sections: bool) -> Self {
        Self {
            cl: sample.lift,
            cdi: sample.induced_drag,
            cm: sample.moment,
            wings: sample
                .wings
                .iter()
                .map(|w| WingReport {
                    tag: w.tag.clone(),
                    cl: w.lift,
                    cdi: w.induced_drag,
                })
                .collect(),
            sections: if sections {
                sample
                    .sections
                    .iter()
                    .map(|s| SectionReport {
                        y_m: s.y,
                        cl: s.lift,
                        cdi: s.induced_drag,
                    })
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}
