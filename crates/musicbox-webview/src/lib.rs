//! WebView integration for the musicbox window.
//!
//! Wraps the `wry` crate to provide:
//! - The two surfaces of the window: the bundled toolbar page (`Chrome`)
//!   and the wrapped site (`Content`)
//! - The bridge IPC envelope and the `window.musicbox` init script
//! - Navigation policy that hands foreign links to the system browser
//! - Event-driven back/forward state and the content status line
//! - The content engine's cookie jar behind the host's cookie store
//! - A `musicbox://` custom protocol serving the bundled toolbar assets

pub mod content;
pub mod cookies;
pub mod events;
pub mod history;
pub mod ipc;
pub mod manager;
pub mod policy;
pub mod status;

pub use content::ContentProvider;
pub use events::{PageLoadState, SurfaceKind, WebViewEvent};
pub use history::{NavState, NavigationHistory};
pub use ipc::{ContentMessage, ControlAction, HistoryChange, IpcEnvelope, IpcError};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};
pub use policy::{NavigationDecision, NavigationGuard, NavigationPolicy};
pub use status::{ContentEvent, ContentState, ContentStatus};
