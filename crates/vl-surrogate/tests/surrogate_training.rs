//! Training the surrogate against full lattice solves.

use nalgebra::Vector3;
use vl_core::{deg, m, m2};
use vl_geometry::{PanelGeometry, WingPlanform, discretize};
use vl_solver::{FlowState, ReferenceValues, VlmSettings, solve};
use vl_surrogate::{
    EnvelopePolicy, SurrogateError, TrainedSurrogate, TrainingGrid, VortexLatticeAnalysis, train,
};

fn two_wing() -> (PanelGeometry, VlmSettings) {
    let main = WingPlanform::rectangular("main_wing", m(10.0), m(1.0));
    let tail = WingPlanform::rectangular("horizontal_tail", m(4.0), m(0.5)).with_origin(4.0, 0.0, 0.5);
    let geometry = discretize(&[main, tail], 5, 1).unwrap();
    let settings = VlmSettings::new(ReferenceValues::new(
        m2(10.0),
        m(1.0),
        Vector3::new(0.25, 0.0, 0.0),
    ));
    (geometry, settings)
}

#[test]
fn training_table_matches_solver_output() {
    let (geometry, settings) = two_wing();
    let grid = TrainingGrid::default();
    let model = train(&geometry, &settings, &grid).unwrap();
    let direct = solve(&FlowState::from_radians(grid.angles().to_vec()), &geometry, &settings).unwrap();

    let training = model.training();
    assert_eq!(training.angles.len(), 5);
    assert_eq!(training.lift, direct.lift());
    assert_eq!(training.induced_drag, direct.induced_drag());
    assert_eq!(training.wings.len(), 2);
    assert_eq!(
        training.wing("horizontal_tail").unwrap().lift,
        direct.wing_lift("horizontal_tail").unwrap()
    );
    assert_eq!(
        training.wing("main_wing").unwrap().induced_drag,
        direct.wing_induced_drag("main_wing").unwrap()
    );
}

#[test]
fn lift_surrogate_tracks_the_solver() {
    let (geometry, settings) = two_wing();
    let model = train(&geometry, &settings, &TrainingGrid::default()).unwrap();

    // grid nodes and held-out angles inside the envelope
    let angles = [-10.0, -7.5, -5.0, 0.0, 2.5, 5.0, 7.5, 10.0];
    let direct = solve(&FlowState::from_degrees(&angles), &geometry, &settings).unwrap();
    for (alpha, sample) in angles.iter().zip(&direct.samples) {
        let out = model.evaluate(deg(*alpha)).unwrap();
        assert!((out.lift - sample.lift).abs() < 5e-3, "alpha {alpha}");
        let main = sample.wing("main_wing").unwrap().lift;
        assert!((out.wing("main_wing").unwrap() - main).abs() < 5e-3, "alpha {alpha}");
    }
    assert!(model.lift_fit().slope > 0.0);
    assert!(model.lift_fit().residual_rms < 5e-3);
}

#[test]
fn wing_fits_follow_geometry_order() {
    let (geometry, settings) = two_wing();
    let model = train(&geometry, &settings, &TrainingGrid::default()).unwrap();
    let tags: Vec<&str> = model.wing_fits().iter().map(|w| w.tag.as_str()).collect();
    assert_eq!(tags, ["main_wing", "horizontal_tail"]);
    let main = model.wing_lift_fit("main_wing").unwrap();
    let tail = model.wing_lift_fit("horizontal_tail").unwrap();
    assert!(main.slope > tail.slope);
}

#[test]
fn envelope_policy_changes_out_of_range_queries_only() {
    let (geometry, settings) = two_wing();
    let extrapolating = train(&geometry, &settings, &TrainingGrid::default()).unwrap();
    assert_eq!(extrapolating.envelope(), EnvelopePolicy::Extrapolate);
    let clamping = extrapolating.clone().with_envelope(EnvelopePolicy::Clamp);

    let inside = deg(3.0);
    assert_eq!(
        extrapolating.evaluate(inside).unwrap().lift,
        clamping.evaluate(inside).unwrap().lift
    );

    let at_edge = clamping.evaluate(deg(10.0)).unwrap();
    let beyond = clamping.evaluate(deg(15.0)).unwrap();
    assert_eq!(at_edge.lift, beyond.lift);
    assert!(extrapolating.evaluate(deg(15.0)).unwrap().lift > at_edge.lift);
}

#[test]
fn analysis_lifecycle_is_train_once_then_evaluate() {
    let (geometry, settings) = two_wing();
    let mut analysis = VortexLatticeAnalysis::new(geometry, settings);
    assert!(!analysis.is_trained());
    assert!(matches!(
        analysis.evaluate(deg(2.0)),
        Err(SurrogateError::NotTrained)
    ));

    analysis.train().unwrap();
    assert!(analysis.is_trained());
    assert!(matches!(analysis.train(), Err(SurrogateError::AlreadyTrained)));

    let batch = analysis
        .evaluate_many(&[deg(-2.0), deg(0.0), deg(2.0)])
        .unwrap();
    assert_eq!(batch.len(), 3);
    assert!(batch[0].lift < batch[1].lift && batch[1].lift < batch[2].lift);

    let frozen: TrainedSurrogate = analysis.into_surrogate().unwrap();
    assert_eq!(frozen.training().angles.len(), 5);
}

#[test]
fn analysis_uses_custom_grid_and_envelope() {
    let (geometry, settings) = two_wing();
    let mut analysis = VortexLatticeAnalysis::new(geometry, settings)
        .with_grid(TrainingGrid::from_degrees(&[-4.0, 0.0, 4.0]))
        .with_envelope(EnvelopePolicy::Clamp);
    let model = analysis.train().unwrap();
    assert_eq!(model.training().angles.len(), 3);
    assert_eq!(model.envelope(), EnvelopePolicy::Clamp);
}

#[test]
fn invalid_grid_is_rejected_before_solving() {
    let (geometry, settings) = two_wing();
    let err = train(&geometry, &settings, &TrainingGrid::from_degrees(&[3.0])).unwrap_err();
    assert!(matches!(err, SurrogateError::InvalidGrid { .. }));
}

#[test]
fn independent_models_train_concurrently() {
    let handles: Vec<_> = [8.0, 12.0]
        .into_iter()
        .map(|span| {
            std::thread::spawn(move || {
                let wing = WingPlanform::rectangular("w", m(span), m(1.0));
                let geometry = discretize(&[wing], 5, 1).unwrap();
                let settings = VlmSettings::new(ReferenceValues::new(
                    m2(span),
                    m(1.0),
                    Vector3::new(0.25, 0.0, 0.0),
                ));
                train(&geometry, &settings, &TrainingGrid::default())
                    .unwrap()
                    .lift_fit()
                    .slope
            })
        })
        .collect();
    let slopes: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // higher aspect ratio, steeper lift curve
    assert!(slopes[1] > slopes[0]);
}

#[test]
fn surrogate_roundtrips_through_json() {
    let (geometry, settings) = two_wing();
    let model = train(&geometry, &settings, &TrainingGrid::default()).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let back: TrainedSurrogate = serde_json::from_str(&json).unwrap();
    let a = model.evaluate(deg(4.0)).unwrap();
    let b = back.evaluate(deg(4.0)).unwrap();
    assert!((a.lift - b.lift).abs() < 1e-12);
}
