use std::cell::RefCell;

use stress_predictor::{
    Classifier, ClassifierError, FeatureSchema, FeatureStats, InputForm, Prediction, PredictionReport,
    Predictor, Session, SessionState,
};

/// Returns a scripted class and distribution and records every vector it sees.
struct ScriptedClassifier {
    class: i64,
    probabilities: Vec<f32>,
    fail_when_first_is: Option<f32>,
    seen: RefCell<Vec<Vec<f32>>>,
}

impl ScriptedClassifier {
    fn new(class: i64, probabilities: Vec<f32>) -> Self {
        Self {
            class,
            probabilities,
            fail_when_first_is: None,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Classifier for ScriptedClassifier {
    fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError> {
        self.seen.borrow_mut().push(features.to_vec());
        if Some(features[0]) == self.fail_when_first_is {
            return Err(ClassifierError::PredictionError("X has 1 features, but model is expecting 2".into()));
        }
        Ok(self.class)
    }

    fn predict_probabilities(&self, _features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        Ok(self.probabilities.clone())
    }
}

fn scenario_schema() -> FeatureSchema {
    FeatureSchema::new(vec![
        ("age", FeatureStats { min: 10.0, max: 80.0, mean: 30.0 }),
        ("sleep_hours", FeatureStats { min: 0.0, max: 12.0, mean: 7.0 }),
    ])
    .expect("valid schema")
}

fn wide_schema() -> FeatureSchema {
    let names = [
        "anxiety_level", "self_esteem", "mental_health_history", "depression",
        "headache", "blood_pressure", "sleep_quality",
    ];
    FeatureSchema::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, FeatureStats { min: 0.0, max: 30.0, mean: i as f64 }))
            .collect(),
    )
    .expect("valid schema")
}

#[test]
fn test_medium_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(1, vec![0.1, 0.7, 0.2]);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    let SessionState::Predicted(report) = session.trigger().clone() else {
        panic!("expected a prediction");
    };
    assert_eq!(report.label, "Trung bình (Medium)");
    assert_eq!(report.confidence, "70.00%");
    assert!(report.explanation.starts_with("Bạn đang có dấu hiệu stress ở mức độ vừa phải."));
    assert_eq!(classifier.seen.borrow()[0], vec![30.0, 7.0]);
    Ok(())
}

#[test]
fn test_vector_order_ignores_edit_order() -> Result<(), Box<dyn std::error::Error>> {
    let schema = wide_schema();
    let classifier = ScriptedClassifier::new(0, vec![1.0, 0.0, 0.0]);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    for (address, value) in [("sleep_quality", 26), ("anxiety_level", 20), ("4", 23), ("self_esteem", 21)] {
        session.set_value(address, value)?;
    }
    session.trigger();

    let seen = classifier.seen.borrow();
    assert_eq!(seen[0].len(), schema.len());
    assert_eq!(seen[0], vec![20.0, 21.0, 2.0, 23.0, 4.0, 5.0, 26.0]);
    Ok(())
}

#[test]
fn test_repeated_trigger_is_idempotent() {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(2, vec![0.05, 0.15, 0.8]);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    let first = session.trigger().clone();
    let second = session.trigger().clone();
    assert_eq!(first, second);
    assert!(matches!(first, SessionState::Predicted(ref r) if r.label == "Cao (High)"));
}

#[test]
fn test_edits_do_not_refresh_result() -> Result<(), Box<dyn std::error::Error>> {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(0, vec![0.6, 0.3, 0.1]);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    session.trigger();
    let before = session.state().clone();
    session.set_value("age", 55)?;
    assert_eq!(session.state(), &before);
    assert_eq!(classifier.seen.borrow().len(), 1);
    Ok(())
}

#[test]
fn test_out_of_range_class_falls_back() {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(9, vec![0.1, 0.7, 0.2]);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    match session.trigger() {
        SessionState::Predicted(report) => {
            assert_eq!(report.label, "Không xác định");
            assert_eq!(report.explanation, "Không có lời giải thích cho kết quả này.");
            assert_eq!(report.confidence, "0.00%");
        }
        other => panic!("expected a fallback prediction, got {:?}", other),
    }
}

#[test]
fn test_unmapped_class_with_probability_keeps_confidence() {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(3, vec![0.1, 0.1, 0.2, 0.6]);
    let prediction = Predictor::new(&schema, &classifier)
        .predict(&InputForm::from_schema(&schema).values())
        .expect("prediction");
    let report = PredictionReport::from_prediction(&prediction);
    assert_eq!(report.label, "Không xác định");
    assert_eq!(report.confidence, "60.00%");
}

#[test]
fn test_confidence_is_for_predicted_class_not_max() {
    let schema = scenario_schema();
    let classifier = ScriptedClassifier::new(0, vec![0.25, 0.5, 0.25]);
    let prediction = Predictor::new(&schema, &classifier)
        .predict(&InputForm::from_schema(&schema).values())
        .expect("prediction");
    assert_eq!(prediction.confidence, 0.25);
}

#[test]
fn test_failure_is_inline_and_recoverable() -> Result<(), Box<dyn std::error::Error>> {
    let schema = scenario_schema();
    let mut classifier = ScriptedClassifier::new(1, vec![0.1, 0.7, 0.2]);
    classifier.fail_when_first_is = Some(30.0);
    let mut session = Session::new(Predictor::new(&schema, &classifier));

    match session.trigger() {
        SessionState::Failed(message) => {
            assert!(message.contains("Đã xảy ra lỗi trong quá trình dự đoán"));
            assert!(message.contains("model is expecting 2"));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    session.set_value("age", 31)?;
    assert!(matches!(session.trigger(), SessionState::Predicted(_)));
    Ok(())
}

#[test]
fn test_confidence_always_has_two_decimals() {
    for step in 0..=100 {
        let p = step as f32 / 100.0;
        let report = PredictionReport::from_prediction(&Prediction {
            predicted_class: 0,
            confidence: p,
            probabilities: vec![p],
        });
        let number = report.confidence.strip_suffix('%').expect("percent sign");
        let (_, decimals) = number.split_once('.').expect("decimal point");
        assert_eq!(decimals.len(), 2);
        let value: f64 = number.parse().expect("number");
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn test_defaults_are_floor_of_mean_within_range() {
    let schema = FeatureSchema::new(vec![
        ("study_load", FeatureStats { min: 0.0, max: 5.0, mean: 2.5 }),
        ("noise_level", FeatureStats { min: 0.2, max: 4.8, mean: 4.79 }),
        ("living_conditions", FeatureStats { min: 1.0, max: 1.0, mean: 1.0 }),
    ])
    .expect("valid schema");

    for (control, feature) in InputForm::from_schema(&schema).controls().iter().zip(schema.features()) {
        assert_eq!(control.default, feature.stats.mean.floor() as i64);
        assert!(control.min <= control.default && control.default <= control.max);
        assert_eq!(control.min, feature.stats.min.floor() as i64);
        assert_eq!(control.max, feature.stats.max.floor() as i64);
    }
}
