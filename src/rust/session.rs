use log::error;

use crate::classifier::Classifier;
use crate::error::StressError;
use crate::form::InputForm;
use crate::predictor::Predictor;
use crate::presenter::PredictionReport;

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No prediction has been triggered yet.
    Idle,
    Predicted(PredictionReport),
    /// The last trigger failed; holds the user-facing message.
    Failed(String),
}

impl SessionState {
    pub fn render(&self) -> Option<String> {
        match self {
            SessionState::Idle => None,
            SessionState::Predicted(report) => Some(report.render()),
            SessionState::Failed(message) => Some(format!("{}\n", message)),
        }
    }
}

/// One interactive session over a loaded schema and classifier.
///
/// Editing values never touches the displayed result; only [`Session::trigger`] does.
#[derive(Debug)]
pub struct Session<'a, C: ?Sized> {
    predictor: Predictor<'a, C>,
    form: InputForm,
    state: SessionState,
}

impl<'a, C: Classifier + ?Sized> Session<'a, C> {
    pub fn new(predictor: Predictor<'a, C>) -> Self {
        let form = InputForm::from_schema(predictor.schema());
        Self {
            predictor,
            form,
            state: SessionState::Idle,
        }
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn set_value(&mut self, address: &str, value: i64) -> Result<i64, StressError> {
        self.form.set(address, value)
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Runs a prediction on the current values and replaces the result area.
    ///
    /// Failures are kept in the state; the session stays usable.
    pub fn trigger(&mut self) -> &SessionState {
        self.state = match self.predictor.predict(&self.form.values()) {
            Ok(prediction) => SessionState::Predicted(PredictionReport::from_prediction(&prediction)),
            Err(e) => {
                error!("Prediction failed: {}", e);
                SessionState::Failed(e.to_string())
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierError;
    use crate::schema::{FeatureSchema, FeatureStats};

    /// Fails whenever the first feature is odd.
    struct Picky;

    impl Classifier for Picky {
        fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError> {
            if features[0] as i64 % 2 == 1 {
                return Err(ClassifierError::PredictionError("odd input".into()));
            }
            Ok(0)
        }

        fn predict_probabilities(&self, _features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
            Ok(vec![0.9, 0.1])
        }
    }

    #[test]
    fn test_state_transitions() -> Result<(), StressError> {
        let schema = FeatureSchema::new(vec![
            ("age", FeatureStats { min: 0.0, max: 10.0, mean: 4.0 }),
        ])
        .unwrap();
        let mut session = Session::new(Predictor::new(&schema, &Picky));
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.state().render().is_none());

        assert!(matches!(session.trigger(), SessionState::Predicted(_)));

        session.set_value("age", 5)?;
        assert!(matches!(session.state(), SessionState::Predicted(_)));

        match session.trigger() {
            SessionState::Failed(message) => assert!(message.contains("odd input")),
            other => panic!("expected failure, got {:?}", other),
        }

        session.reset();
        match session.trigger() {
            SessionState::Predicted(report) => assert_eq!(report.confidence, "90.00%"),
            other => panic!("expected prediction, got {:?}", other),
        }
        Ok(())
    }
}
