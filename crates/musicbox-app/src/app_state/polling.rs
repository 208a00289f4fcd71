//! Polling of menu, webview, cookie and host events between window events.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::MusicboxApp;
use super::types::POLL_INTERVAL;

impl MusicboxApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_menu_events();
            self.poll_webview_events();
            self.poll_cookie_jobs();
            self.poll_host_events();
            self.poll_notifications();
        }

        if self.should_exit {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
