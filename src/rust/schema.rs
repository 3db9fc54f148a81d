//! The feature schema: ordered feature names plus per-feature statistics.
//!
//! The order of [`FeatureSchema::features`] is the exact column order the
//! classifier was trained on.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::{Resource, StressError};

/// Descriptive statistics for one feature, as recorded at training time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// A single schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub stats: FeatureStats,
}

/// On-disk layout of the schema document.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    feature_names: Vec<String>,
    stats: HashMap<String, FeatureStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<Feature>,
}

impl FeatureSchema {
    /// Reads and validates the schema document at `path`.
    ///
    /// # Errors
    /// - `ConfigNotFound` if the file does not exist
    /// - `ConfigInvalid` if it cannot be read, is not valid JSON, or violates
    ///   the schema invariants
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StressError> {
        let path = path.as_ref();
        info!("Loading feature schema from {:?}", path);

        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StressError::ConfigNotFound {
                resource: Resource::SchemaDocument,
                path: path.to_path_buf(),
            },
            _ => StressError::invalid(Resource::SchemaDocument, path, e.to_string()),
        })?;

        let schema = Self::from_json(&text)
            .map_err(|reason| StressError::invalid(Resource::SchemaDocument, path, reason))?;
        info!("Schema loaded with {} features", schema.len());
        Ok(schema)
    }

    /// Parses a schema document, returning a human-readable reason on failure.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let document: SchemaDocument = serde_json::from_str(text)
            .map_err(|e| format!("không phải là tệp JSON hợp lệ ({})", e))?;
        Self::from_document(document)
    }

    /// Builds a schema from `(name, stats)` pairs in column order.
    pub fn new(features: Vec<(impl Into<String>, FeatureStats)>) -> Result<Self, String> {
        let features: Vec<Feature> = features
            .into_iter()
            .map(|(name, stats)| Feature { name: name.into(), stats })
            .collect();
        Self::validate(&features)?;
        Ok(Self { features })
    }

    fn from_document(mut document: SchemaDocument) -> Result<Self, String> {
        let mut features = Vec::with_capacity(document.feature_names.len());
        for name in document.feature_names {
            let stats = document
                .stats
                .remove(&name)
                .ok_or_else(|| format!("feature '{}' has no stats entry", name))?;
            features.push(Feature { name, stats });
        }
        if !document.stats.is_empty() {
            debug!("Ignoring stats for {} unlisted features", document.stats.len());
        }
        Self::validate(&features)?;
        Ok(Self { features })
    }

    fn validate(features: &[Feature]) -> Result<(), String> {
        if features.is_empty() {
            return Err("feature_names cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for feature in features {
            if feature.name.is_empty() {
                return Err("feature names cannot be empty".to_string());
            }
            if !seen.insert(feature.name.as_str()) {
                return Err(format!("feature '{}' is listed more than once", feature.name));
            }

            let FeatureStats { min, max, mean } = feature.stats;
            if !(min.is_finite() && max.is_finite() && mean.is_finite()) {
                return Err(format!("stats for '{}' must be finite numbers", feature.name));
            }
            if !(min <= mean && mean <= max) {
                return Err(format!(
                    "stats for '{}' must satisfy min <= mean <= max (got {}, {}, {})",
                    feature.name, min, mean, max
                ));
            }
        }
        Ok(())
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
