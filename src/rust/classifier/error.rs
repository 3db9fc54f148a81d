use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur while running the stress classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Error occurred while loading or validating the ONNX model
    ModelError(String),
    /// Error occurred while running inference or reading its outputs
    PredictionError(String),
    /// The feature vector handed to the classifier is unusable
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::PredictionError(err.to_string())
    }
}
