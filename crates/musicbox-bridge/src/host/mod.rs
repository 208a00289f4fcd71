//! The privileged side of the bridge.
//!
//! `HostController` owns the cookie store and the (optional) active window,
//! answers every request exactly once, and emits notifications for
//! menu-initiated actions.

use std::fmt;
use std::sync::{Arc, RwLock};

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::command::Request;
use crate::notification::{Notification, NotificationHub};
use crate::outcome::Outcome;
use crate::store::CookieStore;

mod handlers;
mod menu;


/// Name and version reported to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl AppInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Delivery path from the host to the active window.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: Notification);
}

impl NotificationSink for NotificationHub {
    fn deliver(&self, notification: Notification) {
        self.broadcast(notification);
    }
}

impl NotificationSink for std::sync::mpsc::Sender<Notification> {
    fn deliver(&self, notification: Notification) {
        if self.send(notification).is_err() {
            debug!(%notification, "notification dropped: window receiver gone");
        }
    }
}

/// A request in flight together with the slot for its single reply.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: Request,
    pub reply: oneshot::Sender<Outcome>,
}

impl PendingRequest {
    pub fn new(request: Request) -> (Self, oneshot::Receiver<Outcome>) {
        let (reply, rx) = oneshot::channel();
        (Self { request, reply }, rx)
    }
}

pub struct HostController {
    info: AppInfo,
    store: Arc<dyn CookieStore>,
    window: RwLock<Option<Arc<dyn NotificationSink>>>,
}

impl HostController {
    pub fn new(info: AppInfo, store: Arc<dyn CookieStore>) -> Self {
        Self {
            info,
            store,
            window: RwLock::new(None),
        }
    }

    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// Make `sink` the active window. Replaces any previous one.
    pub fn attach_window(&self, sink: Arc<dyn NotificationSink>) {
        if let Ok(mut slot) = self.window.write() {
            *slot = Some(sink);
            debug!("window attached to host");
        }
    }

    /// Forget the active window. Later notifications are dropped.
    pub fn detach_window(&self) {
        if let Ok(mut slot) = self.window.write() {
            if slot.take().is_some() {
                debug!("window detached from host");
            }
        }
    }

    pub fn has_window(&self) -> bool {
        self.window.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Fire-and-forget delivery to the active window.
    /// Returns `false` when there is no window.
    pub(crate) fn notify(&self, notification: Notification) -> bool {
        let sink = match self.window.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        match sink {
            Some(sink) => {
                sink.deliver(notification);
                true
            }
            None => {
                debug!(%notification, "notification dropped: no active window");
                false
            }
        }
    }

    /// Answer `request`. The returned future owns everything it needs, so
    /// callers may spawn it.
    pub fn dispatch(&self, request: Request) -> BoxFuture<'static, Outcome> {
        handlers::dispatch(self.info.clone(), Arc::clone(&self.store), request)
    }

    /// Consume requests until every sender is gone. Each request runs on its
    /// own task; replies complete in whatever order the handlers finish.
    pub async fn serve(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<PendingRequest>) {
        info!("bridge host serving requests");
        while let Some(pending) = rx.recv().await {
            let command = pending.request.command();
            let fut = self.dispatch(pending.request);
            let reply = pending.reply;
            tokio::spawn(async move {
                let outcome = fut.await;
                if reply.send(outcome).is_err() {
                    debug!(%command, "reply dropped: caller went away");
                }
            });
        }
        info!("bridge host stopped: all clients closed");
    }
}

impl fmt::Debug for HostController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostController")
            .field("info", &self.info)
            .field("has_window", &self.has_window())
            .finish_non_exhaustive()
    }
}
