//! Cookie store calls answered by the content engine on the event-loop thread.

use musicbox_common::StorageError;
use musicbox_webview::cookies;

use super::core::MusicboxApp;

impl MusicboxApp {
    /// Serve every queued cookie call against the content surface.
    pub(super) fn poll_cookie_jobs(&mut self) {
        while let Ok(job) = self.cookie_jobs.try_recv() {
            tracing::debug!(kind = job.kind(), "Serving cookie job");
            cookies::serve_job(self.content_handle(), job);
        }
    }

    /// Refuse new cookie calls and fail the queued ones.
    pub(super) fn close_cookie_jobs(&mut self) {
        self.cookie_jobs.close();
        while let Ok(job) = self.cookie_jobs.try_recv() {
            job.fail(StorageError::Backend("window closed".into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::core::MusicboxApp;
    use musicbox_common::StorageError;
    use musicbox_config::MusicboxConfig;
    use std::sync::Arc;
    use std::time::Duration;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn cookie_calls_fail_without_content_surface() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        let rt = runtime();
        let host = Arc::clone(&app.host);
        let call = rt.spawn(async move { host.cookie_count().await });

        for _ in 0..200 {
            app.poll_cookie_jobs();
            if call.is_finished() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        let result = rt.block_on(call).unwrap();
        assert!(matches!(result, Err(StorageError::Backend(_))));
    }

    #[test]
    fn closing_fails_queued_calls() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        let rt = runtime();
        let host = Arc::clone(&app.host);
        let call = rt.spawn(async move { host.menu_clear_cookies().await });

        for _ in 0..200 {
            if !app.cookie_jobs.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        app.close_cookie_jobs();

        let result = rt.block_on(call).unwrap();
        assert_eq!(result, Err(StorageError::Backend("window closed".into())));
    }
}
