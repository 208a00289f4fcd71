//! The typed bridge surface handed to UI code.
//!
//! A `BridgeClient` holds no store and no window: every privileged operation
//! is one request to the host and one reply back.

use std::sync::Arc;

use musicbox_common::BridgeError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

use crate::command::Request;
use crate::cookie::{CookieDetails, CookieRecord};
use crate::host::{HostController, PendingRequest};
use crate::notification::{Notification, NotificationHub, Subscription};

#[derive(Clone, Debug)]
pub struct BridgeClient {
    tx: mpsc::UnboundedSender<PendingRequest>,
    hub: NotificationHub,
}

impl BridgeClient {
    /// A client plus the receiving end a host must serve.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PendingRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                hub: NotificationHub::new(),
            },
            rx,
        )
    }

    /// Wire a client to `host`: spawns the serve loop on the current tokio
    /// runtime and makes this client's listeners the host's active window.
    pub fn connect(host: Arc<HostController>) -> Self {
        let (client, rx) = Self::channel();
        host.attach_window(Arc::new(client.hub.clone()));
        tokio::spawn(host.serve(rx));
        client
    }

    /// Listener hub fed by host notifications.
    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    pub async fn get_app_version(&self) -> Result<String, BridgeError> {
        self.call_as(Request::GetAppVersion).await
    }

    pub async fn get_app_name(&self) -> Result<String, BridgeError> {
        self.call_as(Request::GetAppName).await
    }

    pub async fn get_cookies(&self, url: &str) -> Result<Vec<CookieRecord>, BridgeError> {
        self.call_as(Request::GetCookies {
            url: url.to_string(),
        })
        .await
    }

    pub async fn set_cookie(&self, details: CookieDetails) -> Result<bool, BridgeError> {
        self.call_as(Request::SetCookie(details)).await
    }

    /// Succeeds with `true` whether or not the cookie existed.
    pub async fn remove_cookie(&self, url: &str, name: &str) -> Result<bool, BridgeError> {
        self.call_as(Request::RemoveCookie {
            url: url.to_string(),
            name: name.to_string(),
        })
        .await
    }

    /// Clears the store. Does not raise `cookies-cleared`.
    pub async fn clear_all_cookies(&self) -> Result<bool, BridgeError> {
        self.call_as(Request::ClearAllCookies).await
    }

    pub async fn get_all_cookies(&self) -> Result<Vec<CookieRecord>, BridgeError> {
        self.call_as(Request::GetAllCookies).await
    }

    pub fn on_cookies_cleared<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hub.subscribe(Notification::CookiesCleared, listener)
    }

    pub fn on_reload_requested<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hub.subscribe(Notification::ReloadRequested, listener)
    }

    /// Send one request and wait for its reply.
    pub async fn call(&self, request: Request) -> Result<Value, BridgeError> {
        let command = request.command();
        let (pending, reply) = PendingRequest::new(request);
        self.tx
            .send(pending)
            .map_err(|_| BridgeError::HostUnreachable)?;
        trace!(%command, "bridge request sent");
        let outcome = reply.await.map_err(|_| BridgeError::HostUnreachable)?;
        outcome.into_result()
    }

    async fn call_as<T: DeserializeOwned>(&self, request: Request) -> Result<T, BridgeError> {
        let value = self.call(request).await?;
        serde_json::from_value(value).map_err(|e| BridgeError::Decode(e.to_string()))
    }
}
