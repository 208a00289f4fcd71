//! Internal types and constants for the app state module.

use std::time::Duration;

use musicbox_bridge::Outcome;
use musicbox_common::StorageError;

/// Name reported by `get-app-name`.
pub(super) const APP_NAME: &str = "musicbox";

/// How often to poll for events (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Results produced on the tokio runtime, consumed on the event loop thread.
#[derive(Debug)]
pub(super) enum HostEvent {
    /// A bridge request finished; reply to the chrome page.
    Settle { id: u64, outcome: Outcome },
    /// Cookie Information menu item.
    CookieCount(Result<usize, StorageError>),
    /// Clear All Cookies menu item.
    MenuCleared(Result<(), StorageError>),
}
