//! Graceful shutdown: detach the host, destroy webviews, stop the runtime.

use std::time::Duration;

use super::core::MusicboxApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl MusicboxApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Detach the window from the host (no more notifications)
    /// 2. Destroy webviews (content first, then the toolbar)
    /// 3. Refuse queued cookie calls and drop the menu
    /// 4. Shut down the tokio runtime (cancels in-flight requests)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if self.host.has_window() {
            self.host.detach_window();
        }

        if let Some(ref mut registry) = self.webviews {
            registry.destroy_all();
        }
        self.webviews = None;

        self.close_cookie_jobs();
        self.menu = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.chrome_ready = false;

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::MusicboxApp;
    use musicbox_bridge::Notification;
    use musicbox_common::StorageError;
    use musicbox_config::MusicboxConfig;
    use std::sync::Arc;

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());

        app.shutdown();

        assert!(app.webviews.is_none());
        assert!(app.menu.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(!app.host.has_window());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());

        app.shutdown();
        app.shutdown();

        assert!(app.tokio_runtime.is_none());
        assert!(!app.chrome_ready);
    }

    #[test]
    fn shutdown_detaches_notification_sink() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        app.host.attach_window(Arc::new(app.notify_tx.clone()));
        assert!(app.host.has_window());

        app.shutdown();
        app.host.menu_reload();

        assert!(!app.host.has_window());
        assert_eq!(
            app.notify_rx.try_recv().ok(),
            None::<Notification>,
            "no notification after shutdown"
        );
    }

    #[test]
    fn shutdown_stops_runtime() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        app.tokio_runtime = Some(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap(),
        );

        app.shutdown();

        assert!(app.tokio_runtime.is_none());
        assert!(!app.spawn_host_task(async {
            crate::app_state::types::HostEvent::CookieCount(Ok(0))
        }));
    }

    #[test]
    fn shutdown_refuses_cookie_calls() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        app.shutdown();

        assert!(matches!(
            rt.block_on(app.host.cookie_count()),
            Err(StorageError::Backend(_))
        ));
    }
}
