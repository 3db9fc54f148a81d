//! An interactive stress-level predictor backed by a pre-trained classifier.
//!
//! The pipeline is linear: a [`FeatureSchema`] and an [`OnnxClassifier`] are
//! loaded once at startup, an [`InputForm`] exposes one bounded integer
//! control per feature, and on an explicit trigger the [`Predictor`] orders the
//! values into the trained column order, runs the classifier and maps the
//! class to a [`ClassLabel`].
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use stress_predictor::{AppConfig, Predictor, Session, SessionState};
//!
//! let app = AppConfig::default().load()?;
//! let mut session = Session::new(Predictor::new(&app.schema, &app.classifier));
//!
//! session.set_value("sleep_hours", 6)?;
//! if let SessionState::Predicted(report) = session.trigger() {
//!     println!("{} ({})", report.label, report.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Any type implementing [`Classifier`] can stand in for the ONNX model:
//!
//! ```rust
//! use stress_predictor::{Classifier, ClassifierError, FeatureSchema, FeatureStats, InputForm, Predictor};
//!
//! struct AlwaysMedium;
//!
//! impl Classifier for AlwaysMedium {
//!     fn predict(&self, _features: &[f32]) -> Result<i64, ClassifierError> {
//!         Ok(1)
//!     }
//!     fn predict_probabilities(&self, _features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
//!         Ok(vec![0.1, 0.7, 0.2])
//!     }
//! }
//!
//! let schema = FeatureSchema::new(vec![
//!     ("age", FeatureStats { min: 10.0, max: 80.0, mean: 30.0 }),
//! ]).unwrap();
//! let form = InputForm::from_schema(&schema);
//! let prediction = Predictor::new(&schema, &AlwaysMedium).predict(&form.values()).unwrap();
//! assert_eq!(prediction.confidence, 0.7);
//! ```

pub mod classifier;
pub mod command;
pub mod config;
pub mod error;
pub mod form;
pub mod labels;
pub mod predictor;
pub mod presenter;
mod runtime;
pub mod schema;
pub mod session;

pub use classifier::{Classifier, ClassifierError, OnnxClassifier};
pub use command::Command;
pub use config::{AppConfig, LoadedApp};
pub use error::{Resource, StressError};
pub use form::{InputForm, InputVector, SliderControl};
pub use labels::ClassLabel;
pub use predictor::{Prediction, Predictor};
pub use presenter::PredictionReport;
pub use runtime::{create_session_builder, RuntimeConfig};
pub use schema::{Feature, FeatureSchema, FeatureStats};
pub use session::{Session, SessionState};

/// Initialises `env_logger`, defaulting to warnings so the form stays readable.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
