use std::sync::OnceLock;

use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;

use crate::classifier::ClassifierError;

/// Outcome of the one-time environment setup, kept so every later caller sees it.
static ENVIRONMENT: OnceLock<Result<(), String>> = OnceLock::new();

/// Session options handed to ONNX Runtime when the classifier artifact is loaded.
#[derive(Debug)]
pub struct RuntimeConfig {
    /// 0 lets ONNX Runtime decide.
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            intra_threads: 0,
            optimization_level: GraphOptimizationLevel::Level3,
        }
    }
}

// GraphOptimizationLevel is not Clone.
impl Clone for RuntimeConfig {
    fn clone(&self) -> Self {
        Self {
            intra_threads: self.intra_threads,
            optimization_level: copy_level(&self.optimization_level),
        }
    }
}

fn copy_level(level: &GraphOptimizationLevel) -> GraphOptimizationLevel {
    match level {
        GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
        GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
        GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
        GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
    }
}

/// Sets up the process-wide ONNX Runtime environment on first call.
///
/// A failed setup is remembered and reported to every caller.
pub(crate) fn ensure_initialized() -> Result<(), ClassifierError> {
    ENVIRONMENT
        .get_or_init(|| {
            ort::init()
                .with_name("stress_predictor")
                .commit()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(|e| ClassifierError::ModelError(format!("Failed to initialise ONNX Runtime: {}", e)))
}

pub fn create_session_builder(config: &RuntimeConfig) -> Result<SessionBuilder, ClassifierError> {
    ensure_initialized()?;
    let model_error = |e: ort::Error| ClassifierError::ModelError(format!("Failed to configure session: {}", e));

    let mut builder = Session::builder().map_err(model_error)?;
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads).map_err(model_error)?;
    }
    builder
        .with_optimization_level(copy_level(&config.optimization_level))
        .map_err(model_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_lets_runtime_decide() {
        let config = RuntimeConfig::default();
        assert_eq!(config.intra_threads, 0);
        assert!(matches!(config.optimization_level, GraphOptimizationLevel::Level3));
    }

    #[test]
    fn test_clone_keeps_optimization_level() {
        let config = RuntimeConfig {
            intra_threads: 4,
            optimization_level: GraphOptimizationLevel::Level1,
        };
        let cloned = config.clone();
        assert_eq!(cloned.intra_threads, 4);
        assert!(matches!(cloned.optimization_level, GraphOptimizationLevel::Level1));
    }

    #[test]
    fn test_initialization_outcome_is_stable() {
        assert_eq!(ensure_initialized(), ensure_initialized());
    }
}
