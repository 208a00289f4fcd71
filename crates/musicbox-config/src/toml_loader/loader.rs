//! Core TOML config loading: read from path or platform default.

use crate::schema::MusicboxConfig;
use crate::validation;
use musicbox_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A config that fails validation is
/// logged and returned as parsed; callers that need strictness run
/// [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<MusicboxConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: MusicboxConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `path`, writing the commented default template there
/// first if the file does not exist yet.
pub fn load_or_create(path: &Path) -> Result<MusicboxConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(MusicboxConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/musicbox/config.toml`
/// On Linux: `~/.config/musicbox/config.toml`
pub fn load_default() -> Result<MusicboxConfig, ConfigError> {
    let path = default_config_path()?;
    load_or_create(&path)
}
