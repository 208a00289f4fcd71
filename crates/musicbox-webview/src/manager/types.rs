/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load.
    pub url: String,
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    pub devtools: bool,
    /// Custom user agent string. `None` keeps the engine default.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    /// Whether media may autoplay.
    pub autoplay: bool,
    /// Inject the `window.musicbox` bridge API.
    pub bridge: bool,
}

impl WebViewConfig {
    /// The bundled toolbar page. The only surface with the bridge API.
    pub fn chrome() -> Self {
        Self {
            url: crate::content::CHROME_INDEX_URL.to_string(),
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: false,
            autoplay: false,
            bridge: true,
        }
    }

    /// The wrapped site, starting at `url`.
    pub fn content(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: true,
            bridge: false,
        }
    }

    pub fn with_devtools(mut self, devtools: bool) -> Self {
        self.devtools = devtools;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_chrome_gets_the_bridge() {
        let chrome = WebViewConfig::chrome();
        assert!(chrome.bridge);
        assert!(chrome.url.starts_with("musicbox://"));

        let content = WebViewConfig::content("https://music.apple.com");
        assert!(!content.bridge);
        assert!(content.autoplay);
        assert_eq!(content.url, "https://music.apple.com");
    }

    #[test]
    fn builders_override_defaults() {
        let config = WebViewConfig::content("https://music.apple.com")
            .with_devtools(true)
            .with_user_agent(Some("musicbox/0.1".into()))
            .with_autoplay(false);
        assert!(config.devtools);
        assert_eq!(config.user_agent.as_deref(), Some("musicbox/0.1"));
        assert!(!config.autoplay);
    }
}
