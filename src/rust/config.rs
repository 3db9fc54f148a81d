//! Startup configuration and the one-time loading of the model and schema.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info};
use sha2::{Digest, Sha256};

use crate::classifier::OnnxClassifier;
use crate::error::{Resource, StressError};
use crate::runtime::RuntimeConfig;
use crate::schema::FeatureSchema;

pub const DEFAULT_MODEL_PATH: &str = "stress_trained.onnx";
pub const DEFAULT_SCHEMA_PATH: &str = "data_info.json";

/// Where to find the startup resources and how to run the model.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub schema_path: PathBuf,
    /// Expected SHA-256 of the model artifact, lowercase hex. `None` skips the check.
    pub model_sha256: Option<String>,
    pub runtime: RuntimeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            model_sha256: None,
            runtime: RuntimeConfig::default(),
        }
    }
}

/// The immutable state loaded once at startup.
#[derive(Debug)]
pub struct LoadedApp {
    pub schema: FeatureSchema,
    pub classifier: OnnxClassifier,
}

impl AppConfig {
    /// Loads the classifier artifact, then the schema document.
    ///
    /// Any error here is fatal: the caller must not show the form.
    pub fn load(&self) -> Result<LoadedApp, StressError> {
        let classifier = self.load_classifier()?;
        let schema = FeatureSchema::load(&self.schema_path)?;
        classifier.check_width(schema.len());
        Ok(LoadedApp { schema, classifier })
    }

    fn load_classifier(&self) -> Result<OnnxClassifier, StressError> {
        let path = &self.model_path;
        info!("Loading model artifact from {:?}", path);
        if !path.exists() {
            return Err(StressError::ConfigNotFound {
                resource: Resource::ModelArtifact,
                path: path.clone(),
            });
        }

        if let Some(expected) = &self.model_sha256 {
            verify_artifact(path, expected)?;
        }

        OnnxClassifier::from_file(path, &self.runtime).map_err(|e| {
            error!("Failed to load model: {}", e);
            StressError::invalid(Resource::ModelArtifact, path, e.to_string())
        })
    }
}

/// Checks the model artifact against an expected SHA-256 digest.
pub fn verify_artifact(path: &Path, expected_hash: &str) -> Result<(), StressError> {
    info!("Verifying file: {:?}", path);
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StressError::ConfigNotFound {
            resource: Resource::ModelArtifact,
            path: path.to_path_buf(),
        },
        _ => StressError::invalid(Resource::ModelArtifact, path, e.to_string()),
    })?;

    let actual = sha256_hex(&bytes);
    let expected = expected_hash.trim().to_ascii_lowercase();
    info!("Calculated hash: {}", actual);
    info!("Expected hash:   {}", expected);

    if actual != expected {
        return Err(StressError::invalid(
            Resource::ModelArtifact,
            path,
            format!("hash mismatch: expected {}, got {}", expected, actual),
        ));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
