use std::sync::Arc;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::events::SurfaceKind;
use crate::ipc::{BRIDGE_INIT_SCRIPT, HISTORY_INIT_SCRIPT};
use crate::policy::{NavigationGuard, NavigationPolicy, CHROME_SCHEME};

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create a webview for `surface` as a child of `window`, placed at
    /// `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        surface: SurfaceKind,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);
        let policy = match surface {
            SurfaceKind::Chrome => NavigationPolicy::chrome(),
            SurfaceKind::Content => self.content_policy.clone(),
        };
        let guard = NavigationGuard::new(surface, policy, Arc::clone(&self.opener));
        let provider = self.content_provider.clone();

        let mut builder = WebViewBuilder::with_web_context(&mut self.web_context)
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(surface == SurfaceKind::Content);

        if config.bridge {
            builder = builder.with_initialization_script(BRIDGE_INIT_SCRIPT);
        }
        if surface == SurfaceKind::Content {
            builder = builder.with_initialization_script(HISTORY_INIT_SCRIPT);
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_title_handler(builder, Arc::clone(&events), surface);
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events), guard.clone());
        builder = Self::attach_new_window_handler(builder, Arc::clone(&events), guard);
        builder = attach_custom_protocol(builder, provider);

        builder = builder.with_url(&config.url);
        let webview = builder.build_as_child(window)?;

        debug!(%surface, url = %config.url, "WebView created");

        Ok(WebViewHandle {
            webview,
            surface,
            current_url: config.url,
            current_title: String::new(),
        })
    }

    /// Set the content provider for serving bundled assets via `musicbox://`.
    pub fn set_content_provider(&mut self, provider: crate::content::ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }
}

fn attach_custom_protocol(
    builder: WebViewBuilder<'_>,
    provider: Option<Arc<crate::content::ContentProvider>>,
) -> WebViewBuilder<'_> {
    let Some(cp) = provider else {
        return builder;
    };
    builder.with_custom_protocol(CHROME_SCHEME.to_string(), move |_wv_id, request| {
        let path = request.uri().path().to_string();
        let response = match cp.resolve(&path) {
            Some((mime, data)) => wry::http::Response::builder()
                .status(200)
                .header("Content-Type", mime.as_ref())
                .body(std::borrow::Cow::from(data.into_owned())),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                wry::http::Response::builder()
                    .status(404)
                    .body(std::borrow::Cow::from(b"Not Found".to_vec()))
            }
        };
        response.unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: response build failed");
            wry::http::Response::new(std::borrow::Cow::from(Vec::new()))
        })
    })
}
