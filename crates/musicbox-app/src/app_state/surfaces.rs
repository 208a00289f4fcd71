//! Webview event handling and surface placement.

use musicbox_webview::{ContentEvent, HistoryChange, PageLoadState, SurfaceKind, WebViewEvent};

use super::core::MusicboxApp;
use super::layout;

impl MusicboxApp {
    /// Drain and handle events from both surfaces.
    pub(super) fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(registry) => registry.drain_events(),
            None => return,
        };
        for event in events {
            self.handle_webview_event(event);
        }
    }

    fn handle_webview_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::PageLoad {
                surface: SurfaceKind::Chrome,
                state: PageLoadState::Finished,
                ..
            } => self.on_chrome_ready(),

            WebViewEvent::PageLoad {
                surface: SurfaceKind::Content,
                state,
                url,
            } => self.on_content_load(state, url),

            WebViewEvent::PageLoad { .. } => {}

            WebViewEvent::NavigationStarted {
                surface: SurfaceKind::Content,
                url,
            } => self.apply_content_event(ContentEvent::WillNavigate { url }),

            WebViewEvent::NavigationStarted { .. } => {}

            WebViewEvent::HistoryChanged {
                surface: SurfaceKind::Content,
                change,
                url,
            } => self.on_content_history(change, url),

            WebViewEvent::HistoryChanged { surface, .. } => {
                tracing::warn!(%surface, "Ignoring history report from non-content surface");
            }

            WebViewEvent::IpcMessage { surface, body } => {
                // Handlers only forward chrome messages; checked again here.
                if surface == SurfaceKind::Chrome {
                    self.handle_ipc_message(&body);
                } else {
                    tracing::warn!(%surface, "Dropping IPC message from untrusted surface");
                }
            }

            WebViewEvent::TitleChanged { surface, title } => {
                tracing::debug!(%surface, %title, "Title changed");
                if let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(surface)) {
                    handle.set_title(title);
                }
            }

            WebViewEvent::NavigationDiverted {
                surface,
                url,
                opened_externally,
            } => {
                tracing::info!(%surface, %url, opened_externally, "Navigation diverted");
                if surface == SurfaceKind::Content {
                    // The blocked navigation never loads; settle the status line.
                    self.apply_content_event(ContentEvent::StopLoading);
                }
            }

            WebViewEvent::Closed { surface } => {
                tracing::debug!(%surface, "Surface closed");
            }
        }
    }

    fn on_chrome_ready(&mut self) {
        if !self.chrome_ready {
            self.chrome_ready = true;
            if let Some(window) = &self.window {
                window.set_visible(true);
            }
            tracing::info!("Toolbar loaded, window shown");
        }
        // The toolbar may have reloaded; give it the current state.
        self.push_content_state();
    }

    fn on_content_load(&mut self, state: PageLoadState, url: String) {
        match state {
            PageLoadState::Started => self.apply_content_event(ContentEvent::StartLoading),
            PageLoadState::Finished => {
                let nav_changed = self.history.commit(&url).is_some();
                if let Some(handle) = self
                    .webviews
                    .as_mut()
                    .and_then(|r| r.get_mut(SurfaceKind::Content))
                {
                    handle.set_current_url(url);
                }
                let status_changed = self.status.apply(&ContentEvent::FinishLoad);
                if nav_changed || status_changed {
                    self.push_content_state();
                }
            }
        }
    }

    /// Same-document navigation (`pushState` and friends) in the content page.
    fn on_content_history(&mut self, change: HistoryChange, url: String) {
        tracing::debug!(?change, %url, "Content history changed");
        let nav_changed = self.history.record(change, &url).is_some();
        if let Some(handle) = self
            .webviews
            .as_mut()
            .and_then(|r| r.get_mut(SurfaceKind::Content))
        {
            handle.set_current_url(url.clone());
        }
        let status_changed = self.status.apply(&ContentEvent::DidNavigate { url });
        if nav_changed || status_changed {
            self.push_content_state();
        }
    }

    /// Fold `event` into the status line and push it if it changed.
    pub(super) fn apply_content_event(&mut self, event: ContentEvent) {
        if self.status.apply(&event) {
            self.push_content_state();
        }
    }

    /// Render the current status and nav state in the toolbar.
    pub(super) fn push_content_state(&self) {
        if !self.chrome_ready {
            return;
        }
        let state = self.status.snapshot(self.history.state());
        if let Some(chrome) = self.chrome_handle() {
            if let Err(e) = chrome.render_state(&state) {
                tracing::warn!("Failed to update toolbar: {e}");
            }
        }
    }

    /// Re-place both surfaces after the window changed size.
    pub(super) fn sync_webview_bounds(&self) {
        let rects = self.surface_rects();
        let Some(registry) = &self.webviews else {
            return;
        };
        for (surface, rect) in [
            (SurfaceKind::Chrome, rects.chrome),
            (SurfaceKind::Content, rects.content),
        ] {
            if let Some(handle) = registry.get(surface) {
                if let Err(e) = handle.set_bounds(layout::to_wry(&rect)) {
                    tracing::warn!(%surface, "Failed to set webview bounds: {e}");
                }
            }
        }
    }

    pub(super) fn chrome_handle(&self) -> Option<&musicbox_webview::WebViewHandle> {
        self.webviews
            .as_ref()
            .and_then(|r| r.get(SurfaceKind::Chrome))
    }
}
