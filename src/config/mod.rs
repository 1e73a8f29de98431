//! Configuration module for joinwise.
//!
//! Settings are read once by the host and passed explicitly to the engine.

mod settings;

pub use settings::{GraphSettings, InferenceSettings, Settings, SettingsError, CONFIG_ENV_VAR};
