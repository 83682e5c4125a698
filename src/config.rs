//! Startup configuration for stamp.
//! Captures the relevant environment signals once, so mode detection and
//! value resolution never read the process environment directly.

use std::collections::HashMap;
use std::env;

/// Environment variable selecting YAML mode; value is the document path.
pub const YAML_PATH_VAR: &str = "SEV_YAML_PATH";
/// Environment variable holding the top-level key to extract in YAML mode.
pub const YAML_KEY_VAR: &str = "SEV_YAML_KEY";
/// Environment variable selecting JSON mode; value is the document path.
pub const JSON_PATH_VAR: &str = "SEV_JSON_PATH";
/// Environment variable holding the top-level key to extract in JSON mode.
pub const JSON_KEY_VAR: &str = "SEV_JSON_KEY";
/// Environment variable selecting environment mode; value is a
/// comma-separated list of variable names to resolve.
pub const VAR_NAMES_VAR: &str = "VAR_NAMES_STORAGE";

/// The single active value source for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Yaml,
    Json,
    Env,
    Unknown,
}

impl Mode {
    /// Human-readable description used in the startup banner.
    pub fn describe(&self) -> &'static str {
        match self {
            Mode::Yaml => "Pulling sets of values for variables from YAML file",
            Mode::Json => "Pulling sets of values for variables from JSON file",
            Mode::Env => "Pulling values for variables from environment",
            Mode::Unknown => "Unknown mode",
        }
    }
}

/// Snapshot of the environment taken once at startup.
///
/// Signal variables are normalized so that an empty string counts as unset.
/// `vars` holds the full environment table and is what environment-mode
/// resolution looks names up in, keeping the core testable without mutating
/// real process state.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub yaml_path: Option<String>,
    pub yaml_key: Option<String>,
    pub json_path: Option<String>,
    pub json_key: Option<String>,
    pub var_names: Option<String>,
    pub vars: HashMap<String, String>,
}

impl Config {
    /// Captures the process environment into a `Config`.
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = env::vars().collect();
        Self {
            yaml_path: non_empty(vars.get(YAML_PATH_VAR)),
            yaml_key: non_empty(vars.get(YAML_KEY_VAR)),
            json_path: non_empty(vars.get(JSON_PATH_VAR)),
            json_key: non_empty(vars.get(JSON_KEY_VAR)),
            var_names: non_empty(vars.get(VAR_NAMES_VAR)),
            vars,
        }
    }

    /// Detects the active mode from the captured signals.
    ///
    /// Signals are checked in a fixed priority order (YAML, environment,
    /// JSON) and the first match wins. Setting signals for more than one
    /// mode is not an error; the higher-priority mode silently takes
    /// precedence.
    pub fn mode(&self) -> Mode {
        if self.yaml_path.is_some() {
            Mode::Yaml
        } else if self.var_names.is_some() {
            Mode::Env
        } else if self.json_path.is_some() {
            Mode::Json
        } else {
            Mode::Unknown
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
