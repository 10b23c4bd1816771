//! Project validation logic.

use crate::schema::{Project, SCHEMA_VERSION, WingDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing {context}")]
    Missing { context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn below_right_angle(field: impl Into<String>, value_deg: f64) -> Result<(), ValidationError> {
    if value_deg.is_finite() && value_deg.abs() < 90.0 {
        Ok(())
    } else {
        Err(invalid(field, value_deg, "must be within +/-90 degrees"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version != SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let reference = &project.reference;
    positive("reference.area_m2", reference.area_m2)?;
    positive("reference.chord_m", reference.chord_m)?;
    if !reference.moment_point_m.iter().all(|c| c.is_finite()) {
        return Err(invalid(
            "reference.moment_point_m",
            format!("{:?}", reference.moment_point_m),
            "must be finite",
        ));
    }

    let settings = &project.settings;
    if settings.spanwise_panels == 0 {
        return Err(invalid("settings.spanwise_panels", 0, "must be at least 1"));
    }
    if settings.chordwise_panels == 0 {
        return Err(invalid("settings.chordwise_panels", 0, "must be at least 1"));
    }

    validate_training_angles(&project.training.angles_deg)?;

    if project.wings.is_empty() {
        return Err(ValidationError::Missing {
            context: "wings".to_string(),
        });
    }
    let mut tags = HashSet::new();
    for wing in &project.wings {
        if !tags.insert(wing.tag.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: wing.tag.clone(),
                context: "wings".to_string(),
            });
        }
        validate_wing(wing)?;
    }

    Ok(())
}

fn validate_training_angles(angles_deg: &[f64]) -> Result<(), ValidationError> {
    for (i, angle) in angles_deg.iter().enumerate() {
        below_right_angle(format!("training.angles_deg[{i}]"), *angle)?;
    }
    let distinct = match angles_deg.first() {
        Some(first) => angles_deg.iter().any(|a| a != first),
        None => false,
    };
    if !distinct {
        return Err(invalid(
            "training.angles_deg",
            format!("{angles_deg:?}"),
            "needs at least two distinct angles",
        ));
    }
    Ok(())
}

fn validate_wing(wing: &WingDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("wings.{}.{name}", wing.tag);

    if wing.tag.trim().is_empty() {
        return Err(invalid("wings.tag", "''", "must not be empty"));
    }
    positive(field("semi_span_m"), wing.semi_span_m)?;
    positive(field("root_chord_m"), wing.root_chord_m)?;
    positive(field("tip_chord_m"), wing.tip_chord())?;
    below_right_angle(field("sweep_deg"), wing.sweep_deg)?;
    below_right_angle(field("dihedral_deg"), wing.dihedral_deg)?;
    below_right_angle(field("root_twist_deg"), wing.root_twist_deg)?;
    below_right_angle(field("tip_twist_deg"), wing.tip_twist_deg)?;
    if !wing.origin_m.iter().all(|c| c.is_finite()) {
        return Err(invalid(
            field("origin_m"),
            format!("{:?}", wing.origin_m),
            "must be finite",
        ));
    }
    if wing.symmetric && wing.origin_m[1] < 0.0 {
        return Err(invalid(
            field("origin_m"),
            format!("{:?}", wing.origin_m),
            "mirrored wing root must not lie on the port side",
        ));
    }
    Ok(())
}
