//! Hands URLs and paths to the operating system's default handler.

use std::path::Path;

use musicbox_common::PlatformError;
use tracing::{debug, warn};

/// Opens a target outside the application (system browser, file manager).
pub trait ExternalOpener: Send + Sync {
    /// Open `url` with the system's default handler.
    fn open_url(&self, url: &str) -> Result<(), PlatformError>;

    /// Reveal a local path (directory or file) in the system file manager.
    fn open_path(&self, path: &Path) -> Result<(), PlatformError>;
}

/// [`ExternalOpener`] backed by the `open` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        debug!(url = %url, "opening externally");
        open::that_detached(url).map_err(|e| {
            warn!(url = %url, error = %e, "external open failed");
            PlatformError::OpenerError(format!("{url}: {e}"))
        })
    }

    fn open_path(&self, path: &Path) -> Result<(), PlatformError> {
        debug!(path = %path.display(), "revealing path");
        open::that_detached(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "external open failed");
            PlatformError::OpenerError(format!("{}: {e}", path.display()))
        })
    }
}
