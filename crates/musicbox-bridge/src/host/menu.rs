use musicbox_common::StorageError;
use tracing::{error, info};

use super::HostController;
use crate::notification::Notification;

impl HostController {
    /// Menu "Clear All Cookies": empty the store, then tell the window.
    ///
    /// The bridge `clear-all-cookies` command does not notify; only this
    /// path does.
    pub async fn menu_clear_cookies(&self) -> Result<(), StorageError> {
        if let Err(e) = self.store.clear().await {
            error!(error = %e, "menu clear cookies failed");
            return Err(e);
        }
        info!("cookies cleared from menu");
        self.notify(Notification::CookiesCleared);
        Ok(())
    }

    /// Menu "Reload Page": ask the window to reload its content.
    pub fn menu_reload(&self) {
        self.notify(Notification::ReloadRequested);
    }

    /// Live cookie count for the information dialog.
    pub async fn cookie_count(&self) -> Result<usize, StorageError> {
        self.store.count().await
    }
}
