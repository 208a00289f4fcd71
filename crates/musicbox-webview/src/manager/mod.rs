//! WebView lifecycle management.
//!
//! `WebViewManager` creates and tracks the `wry::WebView` instances of the
//! window: the chrome toolbar and the content surface.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use musicbox_platform::ExternalOpener;

use crate::content::ContentProvider;
use crate::events::WebViewEvent;
use crate::policy::NavigationPolicy;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

pub struct WebViewManager {
    /// Event sink. Handlers push here; the event loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Serves the `musicbox://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
    /// Receives diverted links.
    opener: Arc<dyn ExternalOpener>,
    content_policy: NavigationPolicy,
    /// Engine profile directory shared by every webview.
    web_context: wry::WebContext,
}

impl WebViewManager {
    /// `data_dir` holds the engine's cookies and cache; `None` uses the
    /// engine default.
    pub fn new(
        opener: Arc<dyn ExternalOpener>,
        content_policy: NavigationPolicy,
        data_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
            opener,
            content_policy,
            web_context: wry::WebContext::new(data_dir),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
