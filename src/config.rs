//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/leitfaden/leitfaden.toml`
//! 3. Local config: `./.leitfaden.toml` or the file given with `--config`
//! 4. Environment variables: `LEITFADEN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::NodeId;

/// Start node of the bundled questionnaire.
pub const DEFAULT_START_ID: NodeId = 2;

/// Unified configuration for leitfaden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory or http(s) base URL holding the collections
    pub data_dir: String,
    /// Node collection name
    pub nodes_file: String,
    /// Edge collection name
    pub edges_file: String,
    /// Preferred start node; root detection applies if absent from the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_id: Option<NodeId>,
    /// Request timeout for remote datasets
    pub http_timeout_secs: u64,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: ".".into(),
            nodes_file: "possibilities.json".into(),
            edges_file: "connections.json".into(),
            start_id: Some(DEFAULT_START_ID),
            http_timeout_secs: 30,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<String>,
    pub nodes_file: Option<String>,
    pub edges_file: Option<String>,
    pub start_id: Option<NodeId>,
    pub http_timeout_secs: Option<u64>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for leitfaden.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "leitfaden").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("leitfaden.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".leitfaden.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; returns the input unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Overlay wins field by field where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            nodes_file: overlay
                .nodes_file
                .clone()
                .unwrap_or_else(|| self.nodes_file.clone()),
            edges_file: overlay
                .edges_file
                .clone()
                .unwrap_or_else(|| self.edges_file.clone()),
            start_id: overlay.start_id.or(self.start_id),
            http_timeout_secs: overlay.http_timeout_secs.unwrap_or(self.http_timeout_secs),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Expand shell variables and tilde in the data location.
    fn expand_paths(&mut self) {
        self.data_dir = expand_env_vars(&self.data_dir);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; `./.leitfaden.toml` is used if absent
    ///
    /// An explicit local file must exist; the implicit one is optional.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        match local {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                let implicit = local_config_path(Path::new("."));
                if implicit.exists() {
                    let raw = load_raw_settings(&implicit)?;
                    current = current.merge_with(&raw);
                }
            }
        }

        // 4. Environment variables
        current = Self::apply_env(current, Self::environment())?;

        current.expand_paths();
        Ok(current)
    }

    fn environment() -> Environment {
        Environment::with_prefix("LEITFADEN")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply `LEITFADEN_*` variables from `source` as explicit overrides.
    fn apply_env(mut settings: Self, source: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = val;
        }
        if let Ok(val) = config.get_string("nodes_file") {
            settings.nodes_file = val;
        }
        if let Ok(val) = config.get_string("edges_file") {
            settings.edges_file = val;
        }
        if let Ok(val) = config.get_int("start_id") {
            settings.start_id = Some(val);
        }
        if let Ok(val) = config.get_int("http_timeout_secs") {
            settings.http_timeout_secs = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("http_timeout_secs must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}
