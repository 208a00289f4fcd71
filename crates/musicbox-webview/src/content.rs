//! Bundled content served through the `musicbox://` custom protocol.
//!
//! The chrome surface loads `musicbox://localhost/index.html`; its assets are
//! compiled into the binary, so no files are read at runtime.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// URL of the chrome page. WebView2 serves custom schemes from
/// `http://<scheme>.localhost`.
#[cfg(not(target_os = "windows"))]
pub const CHROME_INDEX_URL: &str = "musicbox://localhost/index.html";
#[cfg(target_os = "windows")]
pub const CHROME_INDEX_URL: &str = "http://musicbox.localhost/index.html";

const CHROME_ASSETS: &[(&str, &str)] = &[
    ("index.html", include_str!("../assets/chrome/index.html")),
    ("chrome.css", include_str!("../assets/chrome/chrome.css")),
    ("chrome.js", include_str!("../assets/chrome/chrome.js")),
];

/// In-memory asset table keyed by request path.
#[derive(Debug, Default)]
pub struct ContentProvider {
    assets: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider preloaded with the chrome page.
    pub fn bundled() -> Self {
        let mut provider = Self::new();
        for (path, body) in CHROME_ASSETS {
            provider.insert(*path, mime_from_extension(Path::new(path)), body.as_bytes());
        }
        provider
    }

    /// Register or replace an asset.
    pub fn insert(&mut self, path: impl Into<String>, mime: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.assets.insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path to MIME type and bytes. An empty path or a
    /// directory path serves its `index.html`.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.split(['?', '#']).next().unwrap_or("").trim_start_matches('/');
        let key = if clean.is_empty() || clean.ends_with('/') {
            Cow::Owned(format!("{clean}index.html"))
        } else {
            Cow::Borrowed(clean)
        };
        self.assets
            .get(key.as_ref())
            .map(|(mime, data)| (Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_chrome_page_resolves() {
        let cp = ContentProvider::bundled();
        assert_eq!(cp.len(), 3);

        let (mime, data) = cp.resolve("index.html").unwrap();
        assert_eq!(mime.as_ref(), "text/html");
        let html = String::from_utf8_lossy(&data);
        assert!(html.contains("chrome.js"));
        assert!(html.contains("statusText"));

        assert_eq!(cp.resolve("/chrome.css").unwrap().0.as_ref(), "text/css");
        assert_eq!(
            cp.resolve("chrome.js").unwrap().0.as_ref(),
            "application/javascript"
        );
    }

    #[test]
    fn empty_path_serves_index() {
        let cp = ContentProvider::bundled();
        assert_eq!(cp.resolve("").unwrap().0.as_ref(), "text/html");
        assert_eq!(cp.resolve("/").unwrap().0.as_ref(), "text/html");
        assert_eq!(cp.resolve("index.html?v=2").unwrap().0.as_ref(), "text/html");
    }

    #[test]
    fn unknown_and_traversal_paths_miss() {
        let cp = ContentProvider::bundled();
        assert!(cp.resolve("missing.js").is_none());
        assert!(cp.resolve("../Cargo.toml").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn chrome_script_uses_bridge_api() {
        let cp = ContentProvider::bundled();
        let (_, data) = cp.resolve("chrome.js").unwrap();
        let js = String::from_utf8_lossy(&data);
        assert!(js.contains("window.musicbox.getAppVersion"));
        assert!(js.contains("onReloadRequested"));
        assert!(js.contains("onCookiesCleared"));
    }

    #[test]
    fn insert_replaces_asset() {
        let mut cp = ContentProvider::new();
        assert!(cp.is_empty());
        cp.insert("a.json", "application/json", b"{}".to_vec());
        cp.insert("a.json", "application/json", b"[]".to_vec());
        assert_eq!(cp.resolve("a.json").unwrap().1.as_ref(), b"[]");
    }
}
