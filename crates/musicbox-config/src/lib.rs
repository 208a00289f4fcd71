//! musicbox configuration system.
//!
//! TOML-based configuration with full validation. All sections use sensible
//! defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{MusicboxConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use musicbox_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default.
///
/// A missing file is created from the commented template. The loaded config
/// is validated and rejected if invalid.
pub fn load_config(path: Option<&Path>) -> Result<MusicboxConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_or_create(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MusicboxConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
