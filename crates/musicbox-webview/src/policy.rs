//! Where each surface may navigate, and what happens to everything else.
//!
//! The content surface stays on its configured origins; any other web link,
//! and every new-window request, goes to the system browser instead. The
//! chrome surface never leaves the bundled `musicbox://` page.

use std::sync::Arc;

use musicbox_platform::ExternalOpener;
use tracing::{debug, warn};
use url::Url;

use crate::events::SurfaceKind;

/// Custom protocol scheme serving the bundled chrome page.
pub const CHROME_SCHEME: &str = "musicbox";

/// Origins the chrome page is served from. WebView2 rewrites
/// `musicbox://localhost/...` to `http://musicbox.localhost/...`.
pub const CHROME_ORIGINS: &[&str] = &["musicbox://localhost", "http://musicbox.localhost"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The surface may proceed.
    Allow,
    /// Suppress and hand the URL to the system browser.
    OpenExternally(String),
    /// Suppress and drop.
    Block,
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// Scheme, host and port. Custom schemes have opaque `url` origins, so
/// origins are compared on these parts directly.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OriginKey {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl OriginKey {
    fn of(url: &Url) -> Option<Self> {
        Some(Self {
            scheme: url.scheme().to_string(),
            host: url.host_str()?.to_ascii_lowercase(),
            port: url.port_or_known_default(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    allowed: Vec<OriginKey>,
}

impl NavigationPolicy {
    /// Policy allowing in-place navigation to `origins` only.
    /// Entries that are not absolute URLs with a host are skipped.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref();
                let key = Url::parse(origin).ok().as_ref().and_then(OriginKey::of);
                if key.is_none() {
                    warn!(origin, "ignoring unusable navigation origin");
                }
                key
            })
            .collect();
        Self { allowed }
    }

    /// Policy for the chrome surface.
    pub fn chrome() -> Self {
        Self::new(CHROME_ORIGINS)
    }

    fn is_allowed_origin(&self, url: &Url) -> bool {
        OriginKey::of(url).is_some_and(|key| self.allowed.contains(&key))
    }

    /// Decide a top-level navigation.
    pub fn decide(&self, url: &str) -> NavigationDecision {
        if url == "about:blank" {
            return NavigationDecision::Allow;
        }
        let Ok(parsed) = Url::parse(url) else {
            return NavigationDecision::Block;
        };
        if self.is_allowed_origin(&parsed) {
            return NavigationDecision::Allow;
        }
        match parsed.scheme() {
            "http" | "https" => NavigationDecision::OpenExternally(url.to_string()),
            _ => NavigationDecision::Block,
        }
    }

    /// Decide a request to open a new top-level window. Never allowed in
    /// place; the URL always goes to the system browser.
    pub fn decide_new_window(&self, url: &str) -> NavigationDecision {
        NavigationDecision::OpenExternally(url.to_string())
    }
}

/// Applies a surface's [`NavigationPolicy`] through an [`ExternalOpener`].
#[derive(Clone)]
pub struct NavigationGuard {
    surface: SurfaceKind,
    policy: NavigationPolicy,
    opener: Arc<dyn ExternalOpener>,
}

impl NavigationGuard {
    pub fn new(surface: SurfaceKind, policy: NavigationPolicy, opener: Arc<dyn ExternalOpener>) -> Self {
        Self {
            surface,
            policy,
            opener,
        }
    }

    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }

    /// Check a top-level navigation; divert it if needed.
    pub fn on_navigation(&self, url: &str) -> NavigationDecision {
        let decision = self.policy.decide(url);
        self.apply(url, &decision);
        decision
    }

    /// Check a new-window request. The surface never proceeds.
    pub fn on_new_window(&self, url: &str) -> NavigationDecision {
        let decision = self.policy.decide_new_window(url);
        self.apply(url, &decision);
        decision
    }

    fn apply(&self, url: &str, decision: &NavigationDecision) {
        match decision {
            NavigationDecision::Allow => {
                debug!(surface = %self.surface, url, "navigation allowed");
            }
            NavigationDecision::OpenExternally(target) => {
                debug!(surface = %self.surface, url, "navigation diverted to system browser");
                if let Err(e) = self.opener.open_url(target) {
                    warn!(surface = %self.surface, url, error = %e, "external open failed");
                }
            }
            NavigationDecision::Block => {
                warn!(surface = %self.surface, url, "navigation blocked");
            }
        }
    }
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("surface", &self.surface)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicbox_common::PlatformError;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        urls: Mutex<Vec<String>>,
    }

    impl ExternalOpener for RecordingOpener {
        fn open_url(&self, url: &str) -> Result<(), PlatformError> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(())
        }

        fn open_path(&self, _path: &Path) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    struct BrokenOpener;

    impl ExternalOpener for BrokenOpener {
        fn open_url(&self, url: &str) -> Result<(), PlatformError> {
            Err(PlatformError::OpenerError(url.to_string()))
        }

        fn open_path(&self, _path: &Path) -> Result<(), PlatformError> {
            Err(PlatformError::NotSupported("paths".into()))
        }
    }

    fn content_policy() -> NavigationPolicy {
        NavigationPolicy::new(["https://music.apple.com", "https://idmsa.apple.com"])
    }

    fn guard() -> (Arc<RecordingOpener>, NavigationGuard) {
        let opener = Arc::new(RecordingOpener::default());
        let guard = NavigationGuard::new(SurfaceKind::Content, content_policy(), opener.clone());
        (opener, guard)
    }

    // -- Content surface --

    #[test]
    fn allows_configured_origins() {
        let policy = content_policy();
        assert!(policy.decide("https://music.apple.com/us/browse").is_allowed());
        assert!(policy.decide("https://music.apple.com:443/").is_allowed());
        assert!(policy.decide("https://IDMSA.apple.com/appleauth").is_allowed());
        assert!(policy.decide("about:blank").is_allowed());
    }

    #[test]
    fn foreign_web_links_open_externally() {
        let policy = content_policy();
        assert_eq!(
            policy.decide("https://www.apple.com/legal/"),
            NavigationDecision::OpenExternally("https://www.apple.com/legal/".into())
        );
        assert_eq!(
            policy.decide("http://music.apple.com/"),
            NavigationDecision::OpenExternally("http://music.apple.com/".into())
        );
    }

    #[test]
    fn prefix_lookalikes_are_not_allowed() {
        let policy = content_policy();
        assert!(!policy.decide("https://music.apple.com.evil.example/").is_allowed());
        assert!(!policy.decide("https://music.apple.com@evil.example/").is_allowed());
        assert!(!policy.decide("https://music.apple.com:8443/").is_allowed());
    }

    #[test]
    fn other_schemes_are_blocked() {
        let policy = content_policy();
        for url in [
            "file:///etc/passwd",
            "javascript:alert(1)",
            "data:text/html,<h1>x</h1>",
            "musicbox://localhost/index.html",
            "not-a-url",
            "",
        ] {
            assert_eq!(policy.decide(url), NavigationDecision::Block, "{url}");
        }
    }

    // -- Chrome surface --

    #[test]
    fn chrome_stays_on_bundled_page() {
        let policy = NavigationPolicy::chrome();
        assert!(policy.decide("musicbox://localhost/index.html").is_allowed());
        assert!(policy.decide("http://musicbox.localhost/index.html").is_allowed());
        assert!(!policy.decide("https://music.apple.com").is_allowed());
        assert_eq!(policy.decide("musicbox://elsewhere/x"), NavigationDecision::Block);
    }

    // -- Guard --

    #[test]
    fn new_window_opens_exact_url_once() {
        for url in [
            "https://music.apple.com/us/album/1",
            "https://example.com/?q=a b",
            "mailto:someone@example.com",
        ] {
            let (opener, guard) = guard();
            let decision = guard.on_new_window(url);
            assert!(!decision.is_allowed());
            assert_eq!(*opener.urls.lock().unwrap(), vec![url.to_string()]);
        }
    }

    #[test]
    fn diverted_navigation_opens_once_and_allowed_does_not() {
        let (opener, guard) = guard();
        assert!(guard.on_navigation("https://music.apple.com/library").is_allowed());
        assert!(opener.urls.lock().unwrap().is_empty());

        assert!(!guard.on_navigation("https://support.apple.com/").is_allowed());
        assert!(!guard.on_navigation("file:///tmp/x").is_allowed());
        assert_eq!(
            *opener.urls.lock().unwrap(),
            vec!["https://support.apple.com/".to_string()]
        );
    }

    #[test]
    fn opener_failure_still_suppresses() {
        let guard = NavigationGuard::new(SurfaceKind::Content, content_policy(), Arc::new(BrokenOpener));
        assert!(!guard.on_new_window("https://example.com").is_allowed());
        assert!(!guard.on_navigation("https://example.com").is_allowed());
    }

    #[test]
    fn unusable_origins_are_skipped() {
        let policy = NavigationPolicy::new(["", "music.apple.com", "https://music.apple.com"]);
        assert!(policy.decide("https://music.apple.com/").is_allowed());
        assert_eq!(policy.allowed.len(), 1);
    }
}
