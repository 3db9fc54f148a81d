//! The inference cycle: schema-ordered projection, classifier call and
//! confidence extraction.

use log::{debug, info, warn};

use crate::classifier::{Classifier, ClassifierError};
use crate::error::StressError;
use crate::form::InputVector;
use crate::labels::ClassLabel;
use crate::schema::FeatureSchema;

/// The outcome of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub predicted_class: i64,
    /// Probability mass the classifier assigned to `predicted_class`.
    pub confidence: f32,
    pub probabilities: Vec<f32>,
}

impl Prediction {
    pub fn class_label(&self) -> ClassLabel {
        ClassLabel::from_index(self.predicted_class)
    }
}

/// Orders `input` into the feature vector the classifier was trained on.
///
/// The result always has one entry per schema feature, in schema order,
/// independent of how `input` was filled.
pub fn project(schema: &FeatureSchema, input: &InputVector) -> Result<Vec<f32>, ClassifierError> {
    schema
        .feature_names()
        .map(|name| {
            input
                .get(name)
                .map(|value| value as f32)
                .ok_or_else(|| ClassifierError::ValidationError(format!("Missing value for feature '{}'", name)))
        })
        .collect()
}

/// `probabilities[predicted_class]`, deliberately not the maximum. A class
/// without an entry in the distribution gets zero.
pub fn confidence_for(predicted_class: i64, probabilities: &[f32]) -> f32 {
    usize::try_from(predicted_class)
        .ok()
        .and_then(|index| probabilities.get(index))
        .copied()
        .unwrap_or(0.0)
}

/// Runs predictions against a loaded schema and classifier.
#[derive(Debug)]
pub struct Predictor<'a, C: ?Sized> {
    schema: &'a FeatureSchema,
    classifier: &'a C,
}

impl<'a, C: Classifier + ?Sized> Predictor<'a, C> {
    pub fn new(schema: &'a FeatureSchema, classifier: &'a C) -> Self {
        Self { schema, classifier }
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.schema
    }

    /// Predicts the stress class for `input`.
    ///
    /// # Errors
    /// `PredictionFailure` if the vector cannot be assembled or the classifier fails.
    pub fn predict(&self, input: &InputVector) -> Result<Prediction, StressError> {
        let features = project(self.schema, input)?;
        debug!("Feature vector: {:?}", features);

        let (predicted_class, probabilities) = self.classifier.predict_with_probabilities(&features)?;
        let confidence = confidence_for(predicted_class, &probabilities);

        if usize::try_from(predicted_class).map_or(true, |i| i >= probabilities.len()) {
            warn!(
                "Class {} has no entry in a distribution of {} classes",
                predicted_class,
                probabilities.len()
            );
        }
        if !ClassLabel::from_index(predicted_class).is_known() {
            warn!("Class {} has no label; showing the fallback", predicted_class);
        }
        info!("Predicted class {} with confidence {:.4}", predicted_class, confidence);

        Ok(Prediction {
            predicted_class,
            confidence,
            probabilities,
        })
    }
}
