//! Toolbar controls acting on the content surface.

use musicbox_webview::{ContentEvent, ControlAction, SurfaceKind};

use super::core::MusicboxApp;

impl MusicboxApp {
    pub(super) fn handle_control(&mut self, action: ControlAction) {
        tracing::debug!(?action, "Toolbar control");
        match action {
            ControlAction::Reload => self.reload_content(ContentEvent::Reloading),
            ControlAction::Retry => self.reload_content(ContentEvent::Retrying),
            ControlAction::Back => {
                if !self.history.go_back() {
                    tracing::debug!("Nothing to go back to");
                    return;
                }
                self.apply_content_event(ContentEvent::GoingBack);
                self.run_on_content(|h| h.go_back());
            }
            ControlAction::Forward => {
                if !self.history.go_forward() {
                    tracing::debug!("Nothing to go forward to");
                    return;
                }
                self.apply_content_event(ContentEvent::GoingForward);
                self.run_on_content(|h| h.go_forward());
            }
            ControlAction::Home => self.go_home(),
        }
    }

    /// Reload the content surface, announcing it with `event`.
    pub(super) fn reload_content(&mut self, event: ContentEvent) {
        self.apply_content_event(event);
        self.run_on_content(|h| h.reload());
    }

    /// Reload by loading the current URL again instead of the engine's
    /// cached reload.
    pub(super) fn force_reload_content(&mut self) {
        self.apply_content_event(ContentEvent::Reloading);
        let result = match self
            .webviews
            .as_mut()
            .and_then(|r| r.get_mut(SurfaceKind::Content))
        {
            Some(handle) => {
                let url = handle.current_url().to_string();
                handle.load_url(&url)
            }
            None => return,
        };
        if let Err(e) = result {
            self.content_failed(e);
        }
    }

    fn go_home(&mut self) {
        self.apply_content_event(ContentEvent::GoingHome);
        let home = self.config.content.home_url.clone();
        let result = match self
            .webviews
            .as_mut()
            .and_then(|r| r.get_mut(SurfaceKind::Content))
        {
            Some(handle) => handle.load_url(&home),
            None => return,
        };
        if let Err(e) = result {
            self.content_failed(e);
        }
    }

    fn run_on_content<F>(&mut self, op: F)
    where
        F: FnOnce(&musicbox_webview::WebViewHandle) -> Result<(), wry::Error>,
    {
        let Some(result) = self.content_handle().map(op) else {
            return;
        };
        if let Err(e) = result {
            self.content_failed(e);
        }
    }

    fn content_failed(&mut self, error: wry::Error) {
        tracing::warn!("Content navigation failed: {error}");
        self.apply_content_event(ContentEvent::FailLoad {
            description: error.to_string(),
        });
    }
}
