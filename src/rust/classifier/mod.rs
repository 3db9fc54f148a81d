//! The classifier capability and its ONNX Runtime implementation.
//!
//! The rest of the crate only ever talks to [`Classifier`], so any conforming
//! implementation (the ONNX model in production, a stub in tests) can be
//! substituted.

mod error;
mod model;

pub use error::ClassifierError;
pub use model::OnnxClassifier;

/// A pre-trained classifier over a flat numeric feature vector.
///
/// The vector must hold exactly one value per schema feature, in schema order.
/// Class indices are small non-negative integers.
pub trait Classifier {
    /// Returns the predicted class index for `features`.
    fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError>;

    /// Returns the probability distribution over all classes for `features`.
    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError>;

    /// Returns the predicted class together with the full distribution.
    ///
    /// Implementations that produce both from a single inference pass should
    /// override this.
    fn predict_with_probabilities(&self, features: &[f32]) -> Result<(i64, Vec<f32>), ClassifierError> {
        let class = self.predict(features)?;
        let probabilities = self.predict_probabilities(features)?;
        Ok((class, probabilities))
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError> {
        (**self).predict(features)
    }

    fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        (**self).predict_probabilities(features)
    }

    fn predict_with_probabilities(&self, features: &[f32]) -> Result<(i64, Vec<f32>), ClassifierError> {
        (**self).predict_with_probabilities(features)
    }
}
