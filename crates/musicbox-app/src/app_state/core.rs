//! MusicboxApp struct definition and constructor.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::UnboundedReceiver;
use winit::window::Window;

use musicbox_bridge::{AppInfo, CookieJob, EngineCookieStore, HostController, Notification};
use musicbox_config::MusicboxConfig;
use musicbox_platform::{ExternalOpener, SystemOpener};
use musicbox_webview::{ContentStatus, NavigationHistory, WebViewRegistry};

use super::menu::AppMenu;
use super::types::{HostEvent, APP_NAME};

/// Top-level application state.
pub struct MusicboxApp {
    pub(super) config: MusicboxConfig,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewRegistry>,
    pub(super) menu: Option<AppMenu>,

    // Bridge host and the channels back to this thread
    pub(super) host: Arc<HostController>,
    pub(super) host_tx: Sender<HostEvent>,
    pub(super) host_rx: Receiver<HostEvent>,
    pub(super) notify_tx: Sender<Notification>,
    pub(super) notify_rx: Receiver<Notification>,
    /// Cookie store calls waiting for the content engine.
    pub(super) cookie_jobs: UnboundedReceiver<CookieJob>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    pub(super) opener: Arc<dyn ExternalOpener>,

    // Content surface state shown in the toolbar
    pub(super) history: NavigationHistory,
    pub(super) status: ContentStatus,
    pub(super) zoom: f64,

    /// Window is shown once the toolbar page has loaded.
    pub(super) chrome_ready: bool,
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl MusicboxApp {
    pub fn new(config: MusicboxConfig) -> Self {
        let (cookies, cookie_jobs) = EngineCookieStore::channel();
        let host = Arc::new(HostController::new(
            AppInfo::new(APP_NAME, env!("CARGO_PKG_VERSION")),
            Arc::new(cookies),
        ));
        let (host_tx, host_rx) = mpsc::channel();
        let (notify_tx, notify_rx) = mpsc::channel();
        Self {
            config,
            window: None,
            webviews: None,
            menu: None,
            host,
            host_tx,
            host_rx,
            notify_tx,
            notify_rx,
            cookie_jobs,
            tokio_runtime: None,
            opener: Arc::new(SystemOpener),
            history: NavigationHistory::new(),
            status: ContentStatus::new(),
            zoom: 1.0,
            chrome_ready: false,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
