use vl_project::schema::*;
use vl_project::{ProjectError, ValidationError, load_json, load_yaml, save_json, save_yaml, validate_project};
use vl_surrogate::EnvelopePolicy;

fn wing(tag: &str, semi_span_m: f64, root_chord_m: f64) -> WingDef {
    WingDef {
        tag: tag.to_string(),
        origin_m: [0.0, 0.0, 0.0],
        semi_span_m,
        root_chord_m,
        tip_chord_m: None,
        sweep_deg: 0.0,
        dihedral_deg: 0.0,
        root_twist_deg: 0.0,
        tip_twist_deg: 0.0,
        symmetric: true,
    }
}

fn project() -> Project {
    let mut tail = wing("horizontal_tail", 2.0, 0.5);
    tail.origin_m = [4.0, 0.0, 0.5];
    tail.tip_chord_m = Some(0.4);
    Project {
        version: SCHEMA_VERSION,
        name: "Roundtrip".to_string(),
        reference: ReferenceDef {
            area_m2: 10.0,
            chord_m: 1.0,
            moment_point_m: [0.25, 0.0, 0.0],
        },
        settings: DiscretizationDef::default(),
        training: TrainingDef {
            angles_deg: vec![-6.0, 0.0, 6.0],
            envelope: EnvelopePolicy::Clamp,
        },
        wings: vec![wing("main_wing", 5.0, 1.0), tail],
    }
}

#[test]
fn roundtrip_yaml() {
    let project = project();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("vl_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = project();
    let path = std::env::temp_dir().join("vl_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn omitted_sections_take_defaults() {
    let yaml = r#"
version: 1
name: Minimal
reference:
  area_m2: 8.0
  chord_m: 1.0
  moment_point_m: [0.25, 0.0, 0.0]
wings:
  - tag: w
    semi_span_m: 4.0
    root_chord_m: 1.0
"#;
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    validate_project(&project).unwrap();
    assert_eq!(project.settings.spanwise_panels, 5);
    assert_eq!(project.settings.chordwise_panels, 1);
    assert_eq!(project.training.angles_deg, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    assert_eq!(project.training.envelope, EnvelopePolicy::Extrapolate);
    assert!(project.wings[0].symmetric);
    assert_eq!(project.wings[0].tip_chord(), 1.0);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = project();
    project.reference.area_m2 = 0.0;
    let path = std::env::temp_dir().join("vl_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &project),
        Err(ProjectError::Validation(ValidationError::InvalidValue { .. }))
    ));
}

#[test]
fn validation_catches_bad_documents() {
    let mut duplicate = project();
    duplicate.wings[1].tag = "main_wing".to_string();
    assert!(matches!(
        validate_project(&duplicate),
        Err(ValidationError::DuplicateId { .. })
    ));

    let mut no_wings = project();
    no_wings.wings.clear();
    assert!(matches!(validate_project(&no_wings), Err(ValidationError::Missing { .. })));

    let mut flat_grid = project();
    flat_grid.training.angles_deg = vec![2.0, 2.0];
    assert!(validate_project(&flat_grid).is_err());

    let mut empty_grid = project();
    empty_grid.training.angles_deg.clear();
    assert!(validate_project(&empty_grid).is_err());

    let mut future = project();
    future.version = SCHEMA_VERSION + 1;
    assert!(matches!(
        validate_project(&future),
        Err(ValidationError::UnsupportedVersion { .. })
    ));

    let mut port_root = project();
    port_root.wings[0].origin_m = [0.0, -1.0, 0.0];
    assert!(validate_project(&port_root).is_err());

    let mut no_panels = project();
    no_panels.settings.spanwise_panels = 0;
    assert!(validate_project(&no_panels).is_err());
}
