use std::collections::HashMap;

use tracing::debug;
use wry::raw_window_handle;

use crate::events::{SurfaceKind, WebViewEvent};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Owns the window's webviews, one per surface.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<SurfaceKind, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    /// Create the webview for `surface`, replacing any existing one.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        surface: SurfaceKind,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<(), wry::Error> {
        let handle = self.manager.create(surface, window, bounds, config)?;
        self.handles.insert(surface, handle);
        Ok(())
    }

    pub fn get(&self, surface: SurfaceKind) -> Option<&WebViewHandle> {
        self.handles.get(&surface)
    }

    pub fn get_mut(&mut self, surface: SurfaceKind) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&surface)
    }

    pub fn destroy(&mut self, surface: SurfaceKind) -> bool {
        if self.handles.remove(&surface).is_some() {
            debug!(%surface, "WebView destroyed");
            self.manager.push_event(WebViewEvent::Closed { surface });
            true
        } else {
            false
        }
    }

    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.manager.drain_events()
    }

    /// Destroy every webview. Used during graceful shutdown.
    pub fn destroy_all(&mut self) {
        for surface in [SurfaceKind::Content, SurfaceKind::Chrome] {
            self.destroy(surface);
        }
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }
}
