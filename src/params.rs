//! Typed, range-validated parameter registry
//!
//! Downstream analyses are configured from a flat set of named numeric
//! parameters, each carrying an inclusive `[min, max]` bound that holds at
//! all times: construction validates the default, and a rejected `set` leaves
//! the previous value intact. Current values round-trip to a flat JSON
//! `name -> value` mapping; bounds, descriptions, and types are registration
//! data and are not persisted.

use crate::{NeurodataError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Declared data type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Float,
}

/// A single named configuration value with inclusive bounds.
///
/// Invariant: `min <= value <= max` after construction. The only state
/// transition is a validated `set`; a rejected value leaves the parameter
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    description: String,
    value: f64,
    min: f64,
    max: f64,
    data_type: ParameterType,
    basic: bool,
    tag: Option<String>,
}

impl Parameter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        description: &str,
        default: f64,
        min: f64,
        max: f64,
        data_type: ParameterType,
        basic: bool,
        tag: Option<&str>,
    ) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(NeurodataError::invalid_argument(format!(
                "parameter {}: invalid bounds [{}, {}]",
                name, min, max
            )));
        }
        if !(min..=max).contains(&default) {
            return Err(NeurodataError::validation(format!(
                "default {} for {} must be between {} and {}",
                default, name, min, max
            )));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            value: default,
            min,
            max,
            data_type,
            basic,
            tag: tag.map(str::to_string),
        })
    }

    /// Transition to a new value, rejecting anything outside `[min, max]`.
    pub fn set(&mut self, value: f64) -> Result<()> {
        if !(self.min..=self.max).contains(&value) {
            return Err(NeurodataError::validation(format!(
                "value {} for {} must be between {} and {}",
                value, self.name, self.min, self.max
            )));
        }
        self.value = value;
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn data_type(&self) -> ParameterType {
        self.data_type
    }

    pub fn is_basic(&self) -> bool {
        self.basic
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Registry of parameters keyed by unique name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    parameters: IndexMap<String, Parameter>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter. Re-registering an existing name replaces its
    /// definition and resets the value to the new default.
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        default: f64,
        min: f64,
        max: f64,
        data_type: ParameterType,
        basic: bool,
        tag: Option<&str>,
    ) -> Result<()> {
        let parameter = Parameter::new(name, description, default, min, max, data_type, basic, tag)?;
        self.parameters.insert(name.to_string(), parameter);
        Ok(())
    }

    /// Set a registered parameter's value.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        self.parameters
            .get_mut(name)
            .ok_or_else(|| {
                NeurodataError::key_not_found(format!("parameter {} does not exist", name))
            })?
            .set(value)
    }

    /// Current value of a registered parameter.
    pub fn get(&self, name: &str) -> Result<f64> {
        Ok(self
            .parameter(name)
            .ok_or_else(|| {
                NeurodataError::key_not_found(format!("parameter {} does not exist", name))
            })?
            .value())
    }

    /// Full record of a parameter, if registered.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Apply a persisted flat `name -> value` mapping via [`Self::set`].
    ///
    /// The first unknown key or out-of-range value aborts the load; entries
    /// applied before the failure stay committed. Callers needing
    /// all-or-nothing semantics should load into a clone and swap.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<()> {
        let values: IndexMap<String, f64> = serde_json::from_reader(reader)?;
        debug!(entries = values.len(), "loading parameter values");
        for (name, value) in values {
            self.set(&name, value)?;
        }
        Ok(())
    }

    /// Write the current flat `name -> value` mapping as JSON.
    ///
    /// Round-trips with [`Self::load`] against identical registrations.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let values: IndexMap<&str, f64> = self
            .parameters
            .iter()
            .map(|(name, parameter)| (name.as_str(), parameter.value()))
            .collect();
        serde_json::to_writer_pretty(writer, &values)?;
        Ok(())
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load(BufReader::new(File::open(path)?))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
