//! TOML-based configuration for joinwise.
//!
//! Example configuration:
//! ```toml
//! [inference]
//! default_join_kind = "left"
//! match_id_columns = true
//! id_suffix = "_id"
//!
//! [graph]
//! removal_policy = "cascade"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::JoinKind;
use crate::semantic::inference::InferenceConfig;
use crate::semantic::join_graph::RemovalPolicy;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "JOINWISE_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Relationship inference settings.
    pub inference: InferenceSettings,

    /// Join graph settings.
    pub graph: GraphSettings,
}

/// Inference settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// Join kind for inferred joins.
    pub default_join_kind: JoinKind,

    /// Match `{table}_id` columns against the other table's `id`.
    pub match_id_columns: bool,

    /// Foreign-key column suffix.
    pub id_suffix: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        let config = InferenceConfig::default();
        Self {
            default_join_kind: config.default_join_kind,
            match_id_columns: config.match_id_columns,
            id_suffix: config.id_suffix,
        }
    }
}

/// Join graph settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// What happens when a removal disconnects tables.
    pub removal_policy: RemovalPolicy,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `JOINWISE_CONFIG`
    /// 2. `./joinwise.toml`
    /// 3. `~/.config/joinwise/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("joinwise.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("joinwise").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let suffix = &self.inference.id_suffix;
        if suffix.is_empty() || suffix.chars().any(char::is_whitespace) {
            return Err(SettingsError::InvalidConfig(format!(
                "inference.id_suffix must be a non-empty word, got '{}'",
                suffix
            )));
        }
        Ok(())
    }

    /// The inferrer configuration described by these settings.
    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            default_join_kind: self.inference.default_join_kind,
            match_id_columns: self.inference.match_id_columns,
            id_suffix: self.inference.id_suffix.clone(),
        }
    }
}
