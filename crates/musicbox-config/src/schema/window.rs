//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window startup mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum StartupMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Main window geometry and chrome settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial inner width in logical pixels (valid range: 400-7680).
    pub width: u32,
    /// Initial inner height in logical pixels (valid range: 300-4320).
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub startup_mode: StartupMode,
    /// Height of the toolbar strip above the content surface (valid range: 0-200).
    pub toolbar_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Apple Music".into(),
            width: 1200,
            height: 800,
            min_width: 800,
            min_height: 600,
            startup_mode: StartupMode::Windowed,
            toolbar_height: 44,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
