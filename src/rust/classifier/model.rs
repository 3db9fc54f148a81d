use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use ndarray::Array2;
use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::{Tensor, ValueType};

use super::error::ClassifierError;
use super::Classifier;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// A stress classifier exported to ONNX (scikit-learn export with ZipMap disabled).
///
/// # Model Format
/// - Input 0: float tensor `[batch_size, n_features]`
/// - Output 0: int64 predicted labels `[batch_size]`
/// - Output 1: float class probabilities `[batch_size, n_classes]`
///
/// The session is created once and never mutated afterwards.
#[derive(Debug)]
pub struct OnnxClassifier {
    model_path: String,
    input_name: String,
    declared_width: Option<usize>,
    session: Session,
}

impl OnnxClassifier {
    /// Loads and validates the model at `model_path`.
    ///
    /// # Errors
    /// - `ModelError` if ONNX Runtime cannot create a session from the file
    /// - `ModelError` if the model does not have the expected inputs and outputs,
    ///   including an output 0 that is not an int64 tensor or an output 1 that is
    ///   not a float tensor (a ZipMap export yields a sequence of maps there)
    pub fn from_file(model_path: impl AsRef<Path>, config: &RuntimeConfig) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        let session = create_session_builder(config)?
            .commit_from_file(model_path)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to load model: {}", e)))?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        let input_name = session.inputs[0].name.clone();
        let declared_width = Self::input_width(&session);
        debug!("Model input '{}' declares width {:?}", input_name, declared_width);

        Ok(Self {
            model_path: model_path.to_string_lossy().to_string(),
            input_name,
            declared_width,
            session,
        })
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// Logs a warning when the model's declared input width differs from `expected`.
    ///
    /// The mismatch itself is not fatal; it surfaces as a prediction failure.
    pub fn check_width(&self, expected: usize) {
        if let Some(width) = self.declared_width {
            if width != expected {
                warn!(
                    "Model '{}' expects {} features but the schema lists {}",
                    self.model_path, width, expected
                );
            }
        }
    }

    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 input for the feature vector".to_string()
            ));
        }

        let outputs = &session.outputs;
        if outputs.len() < 2 {
            return Err(ClassifierError::ModelError(
                format!("Model must have 2 outputs (label and probabilities), found {}", outputs.len())
            ));
        }

        check_output_types(
            tensor_element(&outputs[0].output_type),
            tensor_element(&outputs[1].output_type),
        )
    }

    fn input_width(session: &Session) -> Option<usize> {
        match &session.inputs[0].input_type {
            ValueType::Tensor { dimensions, .. } => dimensions
                .get(1)
                .and_then(|&d| usize::try_from(d).ok()),
            _ => None,
        }
    }

    fn run(&self, features: &[f32]) -> Result<(i64, Vec<f32>), ClassifierError> {
        if features.is_empty() {
            return Err(ClassifierError::ValidationError("Feature vector cannot be empty".into()));
        }

        let input_array = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to create input array: {}", e)))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), Tensor::from_array(input_array)
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to create input tensor: {}", e)))?);

        let outputs = self.session.run(input_tensors)
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to run model: {}", e)))?;

        let labels = outputs[0].try_extract_tensor::<i64>()
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to extract label tensor: {}", e)))?;
        let class = labels.iter().next().copied()
            .ok_or_else(|| ClassifierError::PredictionError("Model returned no label".into()))?;

        let probabilities = outputs[1].try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to extract probability tensor: {}", e)))?;
        let probabilities: Vec<f32> = probabilities.iter().copied().collect();

        Ok((class, probabilities))
    }
}

fn tensor_element(value_type: &ValueType) -> Option<TensorElementType> {
    match value_type {
        ValueType::Tensor { ty, .. } => Some(*ty),
        _ => None,
    }
}

/// Output 0 must be an int64 label tensor, output 1 a float probability tensor.
/// `None` stands for an output that is not a tensor at all.
fn check_output_types(
    label: Option<TensorElementType>,
    probabilities: Option<TensorElementType>,
) -> Result<(), ClassifierError> {
    if label != Some(TensorElementType::Int64) {
        return Err(ClassifierError::ModelError(format!(
            "Output 0 must be an int64 label tensor, found {:?}",
            label
        )));
    }
    if probabilities != Some(TensorElementType::Float32) {
        return Err(ClassifierError::ModelError(format!(
            "Output 1 must be a float probability tensor (export with ZipMap disabled), found {:?}",
            probabilities
        )));
    }
    Ok(())
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError> {
        self.run(features).map(|(class, _)| class)
    }

    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        self.run(features).map(|(_, probabilities)| probabilities)
    }

    fn predict_with_probabilities(&self, features: &[f32]) -> Result<(i64, Vec<f32>), ClassifierError> {
        self.run(features)
    }
}
