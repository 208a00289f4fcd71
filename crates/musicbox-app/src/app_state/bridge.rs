//! Host side of the chrome page's bridge: requests in, replies and
//! notifications out.

use std::future::Future;

use musicbox_bridge::Outcome;
use musicbox_common::BridgeError;
use musicbox_webview::ipc::decode_request;
use musicbox_webview::IpcEnvelope;

use super::core::MusicboxApp;
use super::menu::MenuAction;
use super::types::HostEvent;

impl MusicboxApp {
    /// Handle a JSON message posted by the chrome page.
    pub(super) fn handle_ipc_message(&mut self, body: &str) {
        let envelope = match IpcEnvelope::from_json(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Ignoring IPC message: {e}");
                return;
            }
        };

        match envelope {
            IpcEnvelope::Control { action } => self.handle_control(action),
            IpcEnvelope::Menu { action } => match MenuAction::from_id(&action) {
                Some(action) => self.handle_menu_action(action),
                None => tracing::warn!(%action, "Ignoring unknown menu action"),
            },
            IpcEnvelope::Request { id, command, args } => {
                let request = match decode_request(&command, args) {
                    Ok(request) => request,
                    Err(e) => {
                        tracing::warn!(id, %command, "Rejected bridge request: {e}");
                        self.settle(id, &Outcome::Failure(e.to_string()));
                        return;
                    }
                };
                tracing::debug!(id, %command, "Bridge request");
                let dispatch = self.host.dispatch(request);
                if !self.spawn_host_task(async move {
                    HostEvent::Settle {
                        id,
                        outcome: dispatch.await,
                    }
                }) {
                    self.settle(id, &Outcome::Failure(BridgeError::HostUnreachable.to_string()));
                }
            }
        }
    }

    /// Run `task` on the runtime and deliver its result to the event loop.
    /// Returns `false` when there is no runtime.
    pub(super) fn spawn_host_task<F>(&self, task: F) -> bool
    where
        F: Future<Output = HostEvent> + Send + 'static,
    {
        let Some(runtime) = &self.tokio_runtime else {
            tracing::warn!("Host task dropped: runtime not running");
            return false;
        };
        let tx = self.host_tx.clone();
        runtime.spawn(async move {
            // The receiver is gone only after shutdown.
            let _ = tx.send(task.await);
        });
        true
    }

    /// Resolve the page's pending request `id`.
    pub(super) fn settle(&self, id: u64, outcome: &Outcome) {
        match self.chrome_handle() {
            Some(chrome) => {
                if let Err(e) = chrome.settle(id, outcome) {
                    tracing::warn!(id, "Failed to deliver bridge reply: {e}");
                }
            }
            None => tracing::debug!(id, "Bridge reply dropped: no toolbar"),
        }
    }

    /// Handle results finished on the runtime.
    pub(super) fn poll_host_events(&mut self) {
        while let Ok(event) = self.host_rx.try_recv() {
            match event {
                HostEvent::Settle { id, outcome } => self.settle(id, &outcome),
                HostEvent::CookieCount(Ok(count)) => self.show_cookie_info(count),
                HostEvent::CookieCount(Err(e)) => {
                    tracing::error!("Failed to count cookies: {e}");
                }
                HostEvent::MenuCleared(Ok(())) => tracing::info!("Cookies cleared from menu"),
                HostEvent::MenuCleared(Err(e)) => {
                    tracing::error!("Failed to clear cookies: {e}");
                }
            }
        }
    }

    /// Forward host notifications to the chrome page.
    pub(super) fn poll_notifications(&mut self) {
        while let Ok(notification) = self.notify_rx.try_recv() {
            tracing::debug!(%notification, "Notifying toolbar");
            if let Some(chrome) = self.chrome_handle() {
                if let Err(e) = chrome.notify(notification) {
                    tracing::warn!(%notification, "Failed to notify toolbar: {e}");
                }
            }
        }
    }
}
