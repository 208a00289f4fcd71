//! Window creation, the tokio runtime, and the two webview surfaces.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

use musicbox_common::MusicboxError;
use musicbox_config::schema::StartupMode;
use musicbox_webview::{
    ContentProvider, NavigationPolicy, SurfaceKind, WebViewConfig, WebViewManager,
    WebViewRegistry,
};

use super::core::MusicboxApp;
use super::layout::{self, SurfaceRects};
use super::menu::AppMenu;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl MusicboxApp {
    /// Create the window, the runtime, both surfaces and the menu.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };
        self.window = Some(Arc::clone(&window));

        if let Err(e) = self.start_runtime() {
            tracing::error!("Failed to start async runtime: {e}");
            return false;
        }

        if let Err(e) = self.initialize_webviews(&window) {
            tracing::error!("Failed to create webviews: {e}");
            return false;
        }

        // Notifications from the host reach the event loop through this
        // channel and are forwarded to the chrome page.
        self.host.attach_window(Arc::new(self.notify_tx.clone()));

        self.initialize_menu(&window);

        tracing::info!("Window created and webviews initialized");
        true
    }

    fn window_attributes(&self) -> WindowAttributes {
        let cfg = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(cfg.title.clone())
            .with_inner_size(LogicalSize::new(cfg.width as f64, cfg.height as f64))
            .with_min_inner_size(LogicalSize::new(cfg.min_width as f64, cfg.min_height as f64))
            // Shown once the toolbar page has loaded.
            .with_visible(false);

        match cfg.startup_mode {
            StartupMode::Windowed => attrs,
            StartupMode::Maximized => attrs.with_maximized(true),
            StartupMode::Fullscreen => attrs.with_fullscreen(Some(Fullscreen::Borderless(None))),
        }
    }

    fn start_runtime(&mut self) -> Result<(), MusicboxError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("musicbox-host")
            .enable_all()
            .build()?;
        self.tokio_runtime = Some(runtime);
        Ok(())
    }

    fn initialize_webviews(&mut self, window: &Arc<Window>) -> Result<(), MusicboxError> {
        let content = &self.config.content;
        let data_dir = match musicbox_platform::webview_data_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!("No webview data directory, using engine default: {e}");
                None
            }
        };

        let mut manager = WebViewManager::new(
            Arc::clone(&self.opener),
            NavigationPolicy::new(&content.allowed_origins),
            data_dir,
        );
        manager.set_content_provider(ContentProvider::bundled());
        let mut registry = WebViewRegistry::new(manager);

        let rects = self.surface_rects();
        let webview_err = |e: wry::Error| MusicboxError::WebView(e.to_string());

        registry
            .create(
                SurfaceKind::Chrome,
                window.as_ref(),
                layout::to_wry(&rects.chrome),
                WebViewConfig::chrome().with_devtools(content.devtools),
            )
            .map_err(webview_err)?;

        registry
            .create(
                SurfaceKind::Content,
                window.as_ref(),
                layout::to_wry(&rects.content),
                WebViewConfig::content(content.home_url.clone())
                    .with_user_agent(content.user_agent.clone())
                    .with_devtools(content.devtools)
                    .with_autoplay(content.autoplay),
            )
            .map_err(webview_err)?;

        tracing::info!(home = %content.home_url, "WebView registry initialized");
        self.webviews = Some(registry);
        Ok(())
    }

    fn initialize_menu(&mut self, window: &Window) {
        let menu = match AppMenu::build() {
            Ok(menu) => menu,
            Err(e) => {
                tracing::warn!("Failed to build application menu: {e}");
                return;
            }
        };
        match menu.install(window) {
            Ok(()) => tracing::debug!("Application menu installed"),
            Err(e) => tracing::info!("Application menu unavailable: {e}"),
        }
        // Kept alive for the window's lifetime so its items stay registered.
        self.menu = Some(menu);
    }

    /// Current placement of the two surfaces, in logical pixels.
    pub(super) fn surface_rects(&self) -> SurfaceRects {
        let toolbar = self.config.window.toolbar_height as f64;
        match &self.window {
            Some(w) => {
                let size = w.inner_size().to_logical::<f64>(w.scale_factor());
                layout::split(size.width, size.height, toolbar)
            }
            None => layout::split(
                self.config.window.width as f64,
                self.config.window.height as f64,
                toolbar,
            ),
        }
    }
}
