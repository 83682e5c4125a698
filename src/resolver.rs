//! Value-source resolvers.
//! Each resolver turns one source (environment variables, a YAML document,
//! or a JSON document) into the flat name-to-value table consumed by the
//! substitution engine.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{
    Config, Mode, JSON_KEY_VAR, JSON_PATH_VAR, VAR_NAMES_VAR, YAML_KEY_VAR, YAML_PATH_VAR,
};
use crate::error::{Result, StampError};

/// Resolved name-to-value table used for one substitution run.
pub type ReplacementMap = IndexMap<String, String>;

/// A section of a value-source document: a mapping whose values are all
/// strings. Deserializing through this type is what rejects non-string
/// values and non-mapping shapes.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ValueSection(ReplacementMap);

pub trait ValueSource {
    /// Produces the replacement map for this source.
    fn resolve(&self) -> Result<ReplacementMap>;
}

/// Resolves values from the captured environment table.
///
/// Each listed name is optional: an unset (or empty) variable resolves to
/// the empty string with a warning, never an error.
pub struct EnvSource {
    names: Vec<String>,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Builds the source from a comma-separated name list and an
    /// environment value table. Empty entries from stray commas are
    /// skipped; names are not trimmed, so a space after a comma becomes
    /// part of the looked-up name.
    pub fn new(names: &str, vars: HashMap<String, String>) -> Self {
        let names = names
            .split(',')
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        Self { names, vars }
    }
}

impl ValueSource for EnvSource {
    fn resolve(&self) -> Result<ReplacementMap> {
        let mut map = ReplacementMap::new();
        for name in &self.names {
            let value = self.vars.get(name).cloned().unwrap_or_default();
            // An empty value is indistinguishable from an unset variable.
            if value.is_empty() {
                warn!("{} is not set", name);
            }
            map.insert(name.clone(), value);
        }
        Ok(map)
    }
}

/// Resolves values from a top-level key of a YAML document.
pub struct YamlSource {
    path: PathBuf,
    key: String,
}

impl YamlSource {
    pub fn new<P: AsRef<Path>>(path: P, key: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.to_string(),
        }
    }
}

impl ValueSource for YamlSource {
    fn resolve(&self) -> Result<ReplacementMap> {
        let path = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)?;
        let document: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| StampError::ParseError {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let section = document
            .get(&self.key)
            .ok_or_else(|| StampError::MissingKeyError {
                path: path.clone(),
                key: self.key.clone(),
            })?;
        let section: ValueSection =
            serde_yaml::from_value(section.clone()).map_err(|e| StampError::ShapeError {
                path,
                key: self.key.clone(),
                reason: e.to_string(),
            })?;
        Ok(section.0)
    }
}

/// Resolves values from a top-level key of a JSON document.
pub struct JsonSource {
    path: PathBuf,
    key: String,
}

impl JsonSource {
    pub fn new<P: AsRef<Path>>(path: P, key: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.to_string(),
        }
    }
}

impl ValueSource for JsonSource {
    fn resolve(&self) -> Result<ReplacementMap> {
        let path = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)?;
        let document: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StampError::ParseError {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let section = document
            .get(&self.key)
            .ok_or_else(|| StampError::MissingKeyError {
                path: path.clone(),
                key: self.key.clone(),
            })?;
        let section: ValueSection =
            serde_json::from_value(section.clone()).map_err(|e| StampError::ShapeError {
                path,
                key: self.key.clone(),
                reason: e.to_string(),
            })?;
        Ok(section.0)
    }
}

/// Builds the value source selected by the detected mode.
///
/// # Arguments
/// * `config` - Captured environment snapshot
///
/// # Returns
/// * `Result<Box<dyn ValueSource>>` - The active resolver
///
/// # Errors
/// * `StampError::ConfigError` if no mode could be detected or a required
///   companion key variable is missing
pub fn get_value_source(config: &Config) -> Result<Box<dyn ValueSource>> {
    match config.mode() {
        Mode::Yaml => {
            let path = config.yaml_path.as_deref().unwrap_or_default();
            let key = require_key(config.yaml_key.as_deref(), YAML_KEY_VAR)?;
            Ok(Box::new(YamlSource::new(path, key)))
        }
        Mode::Json => {
            let path = config.json_path.as_deref().unwrap_or_default();
            let key = require_key(config.json_key.as_deref(), JSON_KEY_VAR)?;
            Ok(Box::new(JsonSource::new(path, key)))
        }
        Mode::Env => {
            let names = config.var_names.as_deref().unwrap_or_default();
            Ok(Box::new(EnvSource::new(names, config.vars.clone())))
        }
        Mode::Unknown => Err(StampError::ConfigError(format!(
            "unknown mode, set one of {}, {} or {}",
            YAML_PATH_VAR, VAR_NAMES_VAR, JSON_PATH_VAR
        ))),
    }
}

fn require_key<'a>(value: Option<&'a str>, var: &str) -> Result<&'a str> {
    value.ok_or_else(|| StampError::ConfigError(format!("{} is not set", var)))
}
