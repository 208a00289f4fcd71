use std::path::PathBuf;

use musicbox_common::PlatformError;

pub(super) const APP_NAME: &str = "musicbox";

/// Returns the platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/musicbox`
/// - Linux: `$XDG_CONFIG_HOME/musicbox` (defaults to `~/.config/musicbox`)
/// - Windows: `%APPDATA%\musicbox`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/musicbox`
/// - Linux: `$XDG_DATA_HOME/musicbox` (defaults to `~/.local/share/musicbox`)
/// - Windows: `%APPDATA%\musicbox`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Directory holding the embedded engine's profile (cookies, local storage).
pub fn webview_data_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("webview"))
}

/// Located at `data_dir()/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

/// Located at `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}
