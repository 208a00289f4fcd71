//! Embedded content surface configuration.

use serde::{Deserialize, Serialize};

/// Default site wrapped by the shell.
pub const DEFAULT_HOME_URL: &str = "https://music.apple.com";

/// Settings for the content surface that hosts the wrapped site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Page loaded on startup and by the Home control.
    pub home_url: String,
    /// Custom user agent string. `None` keeps the engine default.
    pub user_agent: Option<String>,
    /// Origins the content surface may navigate to in place.
    /// Any other http(s) navigation is handed to the system browser.
    pub allowed_origins: Vec<String>,
    /// Allow opening developer tools from the View menu.
    pub devtools: bool,
    /// Whether media may start playing without a user gesture.
    pub autoplay: bool,
    /// Zoom increment applied by Zoom In / Zoom Out (valid range: 0.05-1.0).
    pub zoom_step: f64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            home_url: DEFAULT_HOME_URL.into(),
            user_agent: None,
            allowed_origins: vec![
                "https://music.apple.com".into(),
                "https://authorize.music.apple.com".into(),
                "https://idmsa.apple.com".into(),
                "https://appleid.apple.com".into(),
            ],
            devtools: true,
            autoplay: true,
            zoom_step: 0.1,
        }
    }
}
