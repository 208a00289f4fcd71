use std::fs;

use musicbox_common::PlatformError;

use super::resolve::{config_dir, crash_report_dir, data_dir, log_dir, webview_data_dir};

/// Creates all musicbox directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [
        config_dir()?,
        data_dir()?,
        webview_data_dir()?,
        log_dir()?,
        crash_report_dir()?,
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
