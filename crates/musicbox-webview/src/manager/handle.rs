use musicbox_bridge::{Notification, Outcome};
use wry::WebView;

use crate::events::SurfaceKind;
use crate::ipc;
use crate::status::ContentState;

/// Handle to one of the window's webviews.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) surface: SurfaceKind,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.webview.load_url(url)?;
        self.current_url = url.to_string();
        Ok(())
    }

    /// Record the URL the surface actually reached.
    pub fn set_current_url(&mut self, url: String) {
        self.current_url = url;
    }

    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    pub fn reload(&self) -> Result<(), wry::Error> {
        self.webview.reload()
    }

    pub fn go_back(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("history.back();")
    }

    pub fn go_forward(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("history.forward();")
    }

    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Resolve or reject the chrome page's pending request `id`.
    pub fn settle(&self, id: u64, outcome: &Outcome) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&ipc::js_settle(id, outcome))
    }

    /// Fire the chrome page's listeners for `notification`.
    pub fn notify(&self, notification: Notification) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&ipc::js_notify(notification))
    }

    /// Push the content status to the toolbar.
    pub fn render_state(&self, state: &ContentState) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&ipc::js_content_state(state))
    }

    /// Drop cookies, storage and cache held by the engine.
    pub fn clear_browsing_data(&self) -> Result<(), wry::Error> {
        self.webview.clear_all_browsing_data()
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    pub fn toggle_devtools(&self) {
        if self.webview.is_devtools_open() {
            self.webview.close_devtools();
        } else {
            self.webview.open_devtools();
        }
    }

    pub fn zoom(&self, scale: f64) -> Result<(), wry::Error> {
        self.webview.zoom(scale)
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}
