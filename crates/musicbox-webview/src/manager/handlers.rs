use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, SurfaceKind, WebViewEvent};
use crate::ipc::ContentMessage;
use crate::policy::{NavigationDecision, NavigationGuard};

use super::WebViewManager;

/// Screen an IPC body before it reaches the event loop. The chrome surface
/// may post any JSON envelope; the content surface may only report history
/// changes. Everything else is dropped here.
pub fn screen_ipc(surface: SurfaceKind, body: &str) -> Option<WebViewEvent> {
    match surface {
        SurfaceKind::Chrome => {
            if serde_json::from_str::<serde_json::Value>(body).is_err() {
                warn!(%surface, body_len = body.len(), "IPC message rejected: invalid JSON");
                return None;
            }
            Some(WebViewEvent::IpcMessage {
                surface,
                body: body.to_string(),
            })
        }
        SurfaceKind::Content => match ContentMessage::from_json(body) {
            Ok(ContentMessage::History { change, url }) => Some(WebViewEvent::HistoryChanged {
                surface,
                change,
                url,
            }),
            Err(e) => {
                warn!(
                    %surface,
                    body_len = body.len(),
                    "IPC message rejected: surface has no bridge access ({e})"
                );
                None
            }
        },
    }
}

fn push(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

fn diverted(surface: SurfaceKind, url: String, decision: &NavigationDecision) -> WebViewEvent {
    WebViewEvent::NavigationDiverted {
        surface,
        url,
        opened_externally: matches!(decision, NavigationDecision::OpenExternally(_)),
    }
}

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceKind,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body();
            if let Some(event) = screen_ipc(surface, body) {
                debug!(%surface, body_len = body.len(), "IPC message from JS");
                push(&events, event);
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceKind,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(%surface, ?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { surface, state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        surface: SurfaceKind,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(%surface, title = %title, "title changed");
            push(&events, WebViewEvent::TitleChanged { surface, title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        guard: NavigationGuard,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            let surface = guard.surface();
            let decision = guard.on_navigation(&url);
            if decision.is_allowed() {
                push(&events, WebViewEvent::NavigationStarted { surface, url });
                true
            } else {
                push(&events, diverted(surface, url, &decision));
                false
            }
        })
    }

    pub(super) fn attach_new_window_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        guard: NavigationGuard,
    ) -> WebViewBuilder<'a> {
        builder.with_new_window_req_handler(move |url| {
            let decision = guard.on_new_window(&url);
            push(&events, diverted(guard.surface(), url, &decision));
            false
        })
    }
}
