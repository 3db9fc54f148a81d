//! Bounded integer controls, one per schema feature.

use std::collections::HashMap;

use log::debug;

use crate::error::StressError;
use crate::schema::{Feature, FeatureSchema};

/// The user-selected value of every feature, keyed by feature name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputVector {
    values: HashMap<String, i64>,
}

impl InputVector {
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for InputVector {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A slider over `[min, max]` with step 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderControl {
    pub name: String,
    pub label: String,
    pub min: i64,
    pub max: i64,
    pub default: i64,
    value: i64,
}

impl SliderControl {
    /// Truncates the continuous statistics to integers: range
    /// `[floor(min), floor(max)]`, default `floor(mean)`.
    pub fn for_feature(feature: &Feature) -> Self {
        let stats = feature.stats;
        let min = stats.min.floor() as i64;
        let max = stats.max.floor() as i64;
        let default = (stats.mean.floor() as i64).clamp(min, max);
        Self {
            name: feature.name.clone(),
            label: display_label(&feature.name),
            min,
            max,
            default,
            value: default,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Moves the slider, clamping to its range. Returns the value actually set.
    pub fn set(&mut self, value: i64) -> i64 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }
}

/// `sleep_hours` becomes `Sleep hours`: underscores to spaces, first letter
/// upper-cased, the rest lower-cased.
pub fn display_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// All controls of the form, in schema order.
#[derive(Debug, Clone)]
pub struct InputForm {
    controls: Vec<SliderControl>,
}

impl InputForm {
    pub fn from_schema(schema: &FeatureSchema) -> Self {
        Self {
            controls: schema.features().iter().map(SliderControl::for_feature).collect(),
        }
    }

    pub fn controls(&self) -> &[SliderControl] {
        &self.controls
    }

    /// Splits the controls into the two layout columns; the first holds
    /// `len / 2` controls.
    pub fn columns(&self) -> (&[SliderControl], &[SliderControl]) {
        self.controls.split_at(self.controls.len() / 2)
    }

    /// Finds a control by feature name or by its 1-based position on the form.
    pub fn position_of(&self, address: &str) -> Result<usize, StressError> {
        if let Some(index) = self.controls.iter().position(|c| c.name == address) {
            return Ok(index);
        }
        match address.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.controls.len() => Ok(n - 1),
            _ => Err(StressError::UnknownFeature(address.to_string())),
        }
    }

    /// Sets the control at `address`; returns the clamped value.
    pub fn set(&mut self, address: &str, value: i64) -> Result<i64, StressError> {
        let index = self.position_of(address)?;
        let control = &mut self.controls[index];
        let applied = control.set(value);
        debug!("Set '{}' to {} (requested {})", control.name, applied, value);
        Ok(applied)
    }

    pub fn reset(&mut self) {
        self.controls.iter_mut().for_each(SliderControl::reset);
    }

    /// The current values, one entry per feature.
    pub fn values(&self) -> InputVector {
        self.controls.iter().map(|c| (c.name.clone(), c.value)).collect()
    }
}
