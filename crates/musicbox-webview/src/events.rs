//! WebView event types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ipc::HistoryChange;

/// Which of the two webviews in the window an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Bundled toolbar page. The only surface with the bridge API.
    Chrome,
    /// The wrapped website.
    Content,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Chrome => f.write_str("chrome"),
            SurfaceKind::Content => f.write_str("content"),
        }
    }
}

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the window's webviews, drained by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    PageLoad {
        surface: SurfaceKind,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        surface: SurfaceKind,
        title: String,
    },
    /// A JSON message posted by the chrome page.
    IpcMessage {
        surface: SurfaceKind,
        body: String,
    },
    /// A same-document history change reported by the content page.
    HistoryChanged {
        surface: SurfaceKind,
        change: HistoryChange,
        url: String,
    },
    /// A top-level navigation the surface is about to perform.
    NavigationStarted {
        surface: SurfaceKind,
        url: String,
    },
    /// A navigation or new-window request was refused and, for web URLs,
    /// handed to the system browser.
    NavigationDiverted {
        surface: SurfaceKind,
        url: String,
        opened_externally: bool,
    },
    Closed {
        surface: SurfaceKind,
    },
}
