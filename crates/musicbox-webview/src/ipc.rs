//! IPC protocol between the host and the chrome page.
//!
//! - **JS -> Rust**: the chrome page calls
//!   `window.ipc.postMessage(JSON.stringify({...}))` with a `kind`-tagged
//!   envelope, which reaches the `ipc_handler` registered on the webview.
//! - **Rust -> JS**: the host calls `evaluate_script` with the snippets
//!   built here to settle pending promises and fire notifications.

use musicbox_bridge::{Command, Notification, Outcome, Request};
use musicbox_common::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::status::ContentState;

#[derive(Debug, Error, PartialEq)]
pub enum IpcError {
    #[error("IPC body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("IPC envelope malformed: {0}")]
    Malformed(String),
}

/// Toolbar control actions. These act on the content surface and never
/// touch privileged state, so they bypass the request/response bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Reload,
    Back,
    Forward,
    Home,
    Retry,
}

/// A message posted by the chrome page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IpcEnvelope {
    /// A bridge request. `id` is chosen by the page and echoed in the reply.
    Request {
        id: u64,
        command: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    Control {
        action: ControlAction,
    },
    /// An application menu item picked from the toolbar's overflow menu,
    /// named by its menu id (e.g. `cookies.clear`).
    Menu {
        action: String,
    },
}

impl IpcEnvelope {
    /// Parse an envelope from a raw `postMessage` body.
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| IpcError::InvalidJson(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| IpcError::Malformed(e.to_string()))
    }
}

/// How the content page changed its session history without a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryChange {
    /// `history.pushState`: a new entry after the current one.
    Push,
    /// `history.replaceState`: the current entry now has a new URL.
    Replace,
    /// `popstate`: the page moved to another existing entry.
    Pop,
}

/// The only message the content surface may post. It carries navigation
/// facts and nothing the host acts on beyond the toolbar state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentMessage {
    History { change: HistoryChange, url: String },
}

impl ContentMessage {
    pub fn from_json(raw: &str) -> Result<Self, IpcError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| IpcError::InvalidJson(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| IpcError::Malformed(e.to_string()))
    }
}

/// Turn a wire command name and its arguments into a typed request.
/// Names outside the command set are rejected here.
pub fn decode_request(command: &str, args: Vec<Value>) -> Result<Request, BridgeError> {
    let command: Command = command.parse()?;
    Request::from_wire(command, args)
}

/// Script that resolves or rejects the page's pending promise `id`.
pub fn js_settle(id: u64, outcome: &Outcome) -> String {
    let outcome_json = serde_json::to_string(outcome)
        .unwrap_or_else(|_| r#"{"err":"unencodable response"}"#.to_string());
    format!("window.musicbox && window.musicbox.__settle({id}, {outcome_json});")
}

/// Script that fires every page listener for `notification`.
pub fn js_notify(notification: Notification) -> String {
    format!(
        "window.musicbox && window.musicbox.__notify({});",
        serde_json::to_string(notification.name()).unwrap_or_else(|_| "\"\"".to_string())
    )
}

/// Script that pushes content status and navigation state to the toolbar.
pub fn js_content_state(state: &ContentState) -> String {
    let json = serde_json::to_string(state).unwrap_or_else(|_| "null".to_string());
    format!("window.musicboxChrome && window.musicboxChrome.render({json});")
}

/// Injected into the chrome page only. Exposes `window.musicbox`: one
/// promise-returning method per bridge command plus the two notification
/// subscriptions, each returning an unsubscribe function.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.musicbox) { return; }
    var nextId = 1;
    var pending = {};
    var listeners = { 'cookies-cleared': [], 'reload-requested': [] };

    function request(command, args) {
        return new Promise(function(resolve, reject) {
            var id = nextId++;
            pending[id] = { resolve: resolve, reject: reject };
            try {
                window.ipc.postMessage(JSON.stringify({
                    kind: 'request', id: id, command: command, args: args
                }));
            } catch (e) {
                delete pending[id];
                reject(new Error('host unreachable'));
            }
        });
    }

    function subscribe(name, callback) {
        var entry = { callback: callback };
        listeners[name].push(entry);
        return function() {
            var list = listeners[name];
            var at = list.indexOf(entry);
            if (at !== -1) { list.splice(at, 1); }
        };
    }

    var api = {
        getAppVersion: function() { return request('get-app-version', []); },
        getAppName: function() { return request('get-app-name', []); },
        getCookies: function(url) { return request('get-cookies', [url]); },
        setCookie: function(details) { return request('set-cookie', [details]); },
        removeCookie: function(url, name) { return request('remove-cookie', [url, name]); },
        clearAllCookies: function() { return request('clear-all-cookies', []); },
        getAllCookies: function() { return request('get-all-cookies', []); },
        onCookiesCleared: function(cb) { return subscribe('cookies-cleared', cb); },
        onReloadRequested: function(cb) { return subscribe('reload-requested', cb); },
        control: function(action) {
            window.ipc.postMessage(JSON.stringify({ kind: 'control', action: action }));
        },
        menu: function(action) {
            window.ipc.postMessage(JSON.stringify({ kind: 'menu', action: action }));
        },
        __settle: function(id, outcome) {
            var slot = pending[id];
            if (!slot) { return; }
            delete pending[id];
            if (Object.prototype.hasOwnProperty.call(outcome, 'ok')) {
                slot.resolve(outcome.ok);
            } else {
                slot.reject(new Error(outcome.err));
            }
        },
        __notify: function(name) {
            var list = (listeners[name] || []).slice();
            for (var i = 0; i < list.length; i++) {
                try { list[i].callback(); } catch (e) { console.error(e); }
            }
        }
    };
    Object.defineProperty(window, 'musicbox', { value: Object.freeze(api) });
})();
"#;

/// Injected into the content surface. Reports same-document history
/// changes (`pushState`, `replaceState`, `popstate`), which raise no page
/// load, so the toolbar's back and forward buttons stay accurate.
pub const HISTORY_INIT_SCRIPT: &str = r#"
(function() {
    if (window.top !== window || window.__musicboxHistory) { return; }
    Object.defineProperty(window, '__musicboxHistory', { value: true });

    function report(change) {
        try {
            window.ipc.postMessage(JSON.stringify({
                kind: 'history', change: change, url: window.location.href
            }));
        } catch (e) {}
    }

    ['pushState', 'replaceState'].forEach(function(name) {
        var original = window.history[name];
        window.history[name] = function() {
            var result = original.apply(this, arguments);
            report(name === 'pushState' ? 'push' : 'replace');
            return result;
        };
    });
    window.addEventListener('popstate', function() { report('pop'); });
})();
"#;
