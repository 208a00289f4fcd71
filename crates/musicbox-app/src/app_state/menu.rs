//! Application menu: the action model, the `muda` menu built from it, and
//! what each action does.

use muda::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use winit::window::{Fullscreen, Window};

use musicbox_common::PlatformError;
use musicbox_webview::{ContentEvent, SurfaceKind};

use super::core::MusicboxApp;
use super::types::HostEvent;

pub(super) const SOURCE_URL: &str = "https://github.com/staFF6773/apple-music-desktop-linux";
pub(super) const LICENSE_URL: &str =
    "https://github.com/staFF6773/apple-music-desktop-linux/blob/main/LICENSE";

const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum MenuAction {
    Quit,
    Reload,
    ForceReload,
    ToggleDevTools,
    ActualSize,
    ZoomIn,
    ZoomOut,
    ToggleFullScreen,
    ClearCookies,
    ReloadPage,
    OpenCookiesLocation,
    CookieInfo,
    Minimize,
    Close,
    OpenSource,
    OpenSourceLicense,
}

/// Submenus in order; `None` is a separator.
pub(super) const MENU_LAYOUT: &[(&str, &[Option<MenuAction>])] = &[
    ("File", &[Some(MenuAction::Quit)]),
    (
        "View",
        &[
            Some(MenuAction::Reload),
            Some(MenuAction::ForceReload),
            Some(MenuAction::ToggleDevTools),
            None,
            Some(MenuAction::ActualSize),
            Some(MenuAction::ZoomIn),
            Some(MenuAction::ZoomOut),
            None,
            Some(MenuAction::ToggleFullScreen),
        ],
    ),
    (
        "Cookies",
        &[
            Some(MenuAction::ClearCookies),
            Some(MenuAction::ReloadPage),
            Some(MenuAction::OpenCookiesLocation),
            None,
            Some(MenuAction::CookieInfo),
        ],
    ),
    ("Window", &[Some(MenuAction::Minimize), Some(MenuAction::Close)]),
    (
        "Help",
        &[
            Some(MenuAction::OpenSource),
            Some(MenuAction::OpenSourceLicense),
        ],
    ),
];

impl MenuAction {
    pub(super) const ALL: [MenuAction; 16] = [
        MenuAction::Quit,
        MenuAction::Reload,
        MenuAction::ForceReload,
        MenuAction::ToggleDevTools,
        MenuAction::ActualSize,
        MenuAction::ZoomIn,
        MenuAction::ZoomOut,
        MenuAction::ToggleFullScreen,
        MenuAction::ClearCookies,
        MenuAction::ReloadPage,
        MenuAction::OpenCookiesLocation,
        MenuAction::CookieInfo,
        MenuAction::Minimize,
        MenuAction::Close,
        MenuAction::OpenSource,
        MenuAction::OpenSourceLicense,
    ];

    /// Stable menu item id.
    pub(super) fn id(self) -> &'static str {
        match self {
            MenuAction::Quit => "file.quit",
            MenuAction::Reload => "view.reload",
            MenuAction::ForceReload => "view.force_reload",
            MenuAction::ToggleDevTools => "view.devtools",
            MenuAction::ActualSize => "view.actual_size",
            MenuAction::ZoomIn => "view.zoom_in",
            MenuAction::ZoomOut => "view.zoom_out",
            MenuAction::ToggleFullScreen => "view.fullscreen",
            MenuAction::ClearCookies => "cookies.clear",
            MenuAction::ReloadPage => "cookies.reload",
            MenuAction::OpenCookiesLocation => "cookies.location",
            MenuAction::CookieInfo => "cookies.info",
            MenuAction::Minimize => "window.minimize",
            MenuAction::Close => "window.close",
            MenuAction::OpenSource => "help.source",
            MenuAction::OpenSourceLicense => "help.license",
        }
    }

    pub(super) fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            MenuAction::Quit => "Quit",
            MenuAction::Reload => "Reload",
            MenuAction::ForceReload => "Force Reload",
            MenuAction::ToggleDevTools => "Toggle Developer Tools",
            MenuAction::ActualSize => "Actual Size",
            MenuAction::ZoomIn => "Zoom In",
            MenuAction::ZoomOut => "Zoom Out",
            MenuAction::ToggleFullScreen => "Toggle Full Screen",
            MenuAction::ClearCookies => "Clear All Cookies",
            MenuAction::ReloadPage => "Reload Page",
            MenuAction::OpenCookiesLocation => "Open Cookies Location",
            MenuAction::CookieInfo => "Cookie Information",
            MenuAction::Minimize => "Minimize",
            MenuAction::Close => "Close",
            MenuAction::OpenSource => "Open Source",
            MenuAction::OpenSourceLicense => "Open Source License",
        }
    }

    pub(super) fn accelerator(self) -> Option<&'static str> {
        match self {
            MenuAction::Quit => Some("CmdOrCtrl+Q"),
            MenuAction::ForceReload => Some("CmdOrCtrl+Shift+R"),
            MenuAction::ToggleDevTools => Some("CmdOrCtrl+Alt+I"),
            MenuAction::ActualSize => Some("CmdOrCtrl+0"),
            MenuAction::ZoomIn => Some("CmdOrCtrl+Equal"),
            MenuAction::ZoomOut => Some("CmdOrCtrl+Minus"),
            MenuAction::ToggleFullScreen => Some("F11"),
            MenuAction::ClearCookies => Some("Ctrl+Shift+Delete"),
            MenuAction::ReloadPage => Some("Ctrl+R"),
            MenuAction::Minimize => Some("CmdOrCtrl+M"),
            MenuAction::Close => Some("CmdOrCtrl+W"),
            _ => None,
        }
    }
}

/// Zoom factor after a zoom action, clamped to a usable range.
pub(super) fn zoom_after(action: MenuAction, current: f64, step: f64) -> f64 {
    let next = match action {
        MenuAction::ZoomIn => current + step,
        MenuAction::ZoomOut => current - step,
        MenuAction::ActualSize => 1.0,
        _ => current,
    };
    // Round away float drift from repeated steps.
    ((next * 100.0).round() / 100.0).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Message and detail text of the Cookie Information dialog.
pub(super) fn cookie_info_text(count: usize) -> (String, String) {
    (
        format!("Total Cookies: {count}"),
        format!(
            "The application currently has {count} cookies stored. \
             Use \"Clear All Cookies\" to remove them all."
        ),
    )
}

/// The native application menu.
pub(super) struct AppMenu {
    menu: Menu,
}

impl AppMenu {
    pub(super) fn build() -> Result<Self, PlatformError> {
        let menu = Menu::new();
        for (title, entries) in MENU_LAYOUT {
            let submenu = Submenu::new(*title, true);
            for entry in entries.iter() {
                let appended = match entry {
                    Some(action) => submenu.append(&MenuItem::with_id(
                        action.id(),
                        action.label(),
                        true,
                        action.accelerator().and_then(|a| a.parse().ok()),
                    )),
                    None => submenu.append(&PredefinedMenuItem::separator()),
                };
                appended.map_err(|e| PlatformError::MenuError(e.to_string()))?;
            }
            menu.append(&submenu)
                .map_err(|e| PlatformError::MenuError(e.to_string()))?;
        }
        Ok(Self { menu })
    }

    /// Attach the menu to the platform's menu bar.
    pub(super) fn install(&self, window: &Window) -> Result<(), PlatformError> {
        #[cfg(target_os = "macos")]
        {
            let _ = window;
            self.menu.init_for_nsapp();
            Ok(())
        }

        #[cfg(target_os = "windows")]
        {
            use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
            let handle = window
                .window_handle()
                .map_err(|e| PlatformError::MenuError(e.to_string()))?;
            match handle.as_raw() {
                RawWindowHandle::Win32(h) => unsafe { self.menu.init_for_hwnd(h.hwnd.get()) }
                    .map_err(|e| PlatformError::MenuError(e.to_string())),
                _ => Err(PlatformError::MenuError("not a Win32 window".into())),
            }
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let _ = (window, &self.menu);
            Err(PlatformError::NotSupported(
                "native menu bar needs a GTK window".into(),
            ))
        }
    }
}

impl MusicboxApp {
    /// Drain pending menu clicks.
    pub(super) fn poll_menu_events(&mut self) {
        while let Ok(event) = muda::MenuEvent::receiver().try_recv() {
            match MenuAction::from_id(event.id.0.as_str()) {
                Some(action) => self.handle_menu_action(action),
                None => tracing::debug!(id = ?event.id, "Unknown menu item"),
            }
        }
    }

    pub(super) fn handle_menu_action(&mut self, action: MenuAction) {
        tracing::debug!(?action, "Menu action");
        match action {
            MenuAction::Quit | MenuAction::Close => {
                self.shutdown();
                self.should_exit = true;
            }
            MenuAction::Reload => self.reload_content(ContentEvent::Reloading),
            MenuAction::ForceReload => self.force_reload_content(),
            MenuAction::ToggleDevTools => {
                if !self.config.content.devtools {
                    tracing::info!("Developer tools are disabled in config");
                    return;
                }
                if let Some(handle) = self.content_handle() {
                    handle.toggle_devtools();
                }
            }
            MenuAction::ActualSize | MenuAction::ZoomIn | MenuAction::ZoomOut => {
                self.zoom = zoom_after(action, self.zoom, self.config.content.zoom_step);
                if let Some(handle) = self.content_handle() {
                    if let Err(e) = handle.zoom(self.zoom) {
                        tracing::warn!(error = %e, "Failed to set zoom");
                    }
                }
            }
            MenuAction::ToggleFullScreen => {
                if let Some(window) = &self.window {
                    let next = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(next);
                }
            }
            MenuAction::ClearCookies => self.menu_clear_cookies(),
            MenuAction::ReloadPage => self.host.menu_reload(),
            MenuAction::OpenCookiesLocation => match musicbox_platform::data_dir() {
                Ok(dir) => {
                    if let Err(e) = self.opener.open_path(&dir) {
                        tracing::warn!(error = %e, "Failed to open cookies location");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "No data directory"),
            },
            MenuAction::CookieInfo => {
                let host = std::sync::Arc::clone(&self.host);
                self.spawn_host_task(async move { HostEvent::CookieCount(host.cookie_count().await) });
            }
            MenuAction::Minimize => {
                if let Some(window) = &self.window {
                    window.set_minimized(true);
                }
            }
            MenuAction::OpenSource => self.open_external(SOURCE_URL),
            MenuAction::OpenSourceLicense => self.open_external(LICENSE_URL),
        }
    }

    /// Menu "Clear All Cookies": the host clears the engine's jar through
    /// its cookie store, then notifies the window.
    fn menu_clear_cookies(&mut self) {
        let host = std::sync::Arc::clone(&self.host);
        self.spawn_host_task(async move { HostEvent::MenuCleared(host.menu_clear_cookies().await) });
    }

    pub(super) fn show_cookie_info(&self, count: usize) {
        let (message, detail) = cookie_info_text(count);
        let mut dialog = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("Cookie Information")
            .set_description(format!("{message}\n\n{detail}"))
            .set_buttons(rfd::MessageButtons::Ok);
        if let Some(window) = &self.window {
            dialog = dialog.set_parent(window.as_ref());
        }
        let _ = dialog.show();
    }

    fn open_external(&self, url: &str) {
        if let Err(e) = self.opener.open_url(url) {
            tracing::warn!(url, error = %e, "Failed to open link");
        }
    }

    pub(super) fn content_handle(&self) -> Option<&musicbox_webview::WebViewHandle> {
        self.webviews
            .as_ref()
            .and_then(|r| r.get(SurfaceKind::Content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicbox_bridge::Notification;
    use musicbox_config::MusicboxConfig;
    use musicbox_webview::{ContentProvider, IpcEnvelope};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn menu_message(id: &str) -> String {
        format!(r#"{{"kind":"menu","action":"{id}"}}"#)
    }

    #[test]
    fn ids_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for action in MenuAction::ALL {
            assert!(seen.insert(action.id()), "duplicate id {}", action.id());
            assert_eq!(MenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id("file.format_disk"), None);
    }

    #[test]
    fn layout_lists_every_action_once() {
        let listed: Vec<MenuAction> = MENU_LAYOUT
            .iter()
            .flat_map(|(_, entries)| entries.iter().flatten().copied())
            .collect();
        assert_eq!(listed.len(), MenuAction::ALL.len());
        let unique: HashSet<_> = listed.into_iter().collect();
        assert_eq!(unique.len(), MenuAction::ALL.len());
    }

    #[test]
    fn menu_titles_in_order() {
        let titles: Vec<&str> = MENU_LAYOUT.iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["File", "View", "Cookies", "Window", "Help"]);
    }

    #[test]
    fn cookie_shortcuts() {
        assert_eq!(
            MenuAction::ClearCookies.accelerator(),
            Some("Ctrl+Shift+Delete")
        );
        assert_eq!(MenuAction::ReloadPage.accelerator(), Some("Ctrl+R"));
        assert_eq!(MenuAction::CookieInfo.accelerator(), None);
    }

    #[test]
    fn accelerators_parse() {
        for action in MenuAction::ALL {
            if let Some(accel) = action.accelerator() {
                assert!(
                    accel.parse::<muda::accelerator::Accelerator>().is_ok(),
                    "{accel} should parse"
                );
            }
        }
    }

    #[test]
    fn zoom_steps_and_clamps() {
        assert_eq!(zoom_after(MenuAction::ZoomIn, 1.0, 0.1), 1.1);
        assert_eq!(zoom_after(MenuAction::ZoomOut, 1.0, 0.1), 0.9);
        assert_eq!(zoom_after(MenuAction::ActualSize, 2.3, 0.1), 1.0);
        assert_eq!(zoom_after(MenuAction::ZoomOut, 0.3, 0.1), MIN_ZOOM);
        assert_eq!(zoom_after(MenuAction::ZoomIn, 4.95, 0.1), MAX_ZOOM);

        let mut zoom = 1.0;
        for _ in 0..3 {
            zoom = zoom_after(MenuAction::ZoomIn, zoom, 0.1);
        }
        assert_eq!(zoom, 1.3);
    }

    #[test]
    fn cookie_info_wording() {
        let (message, detail) = cookie_info_text(3);
        assert_eq!(message, "Total Cookies: 3");
        assert!(detail.contains("has 3 cookies stored"));
        assert!(detail.contains("Clear All Cookies"));
    }

    #[test]
    fn every_action_is_reachable_from_the_toolbar() {
        let provider = ContentProvider::bundled();
        let (_, page) = provider.resolve("index.html").unwrap();
        let page = String::from_utf8_lossy(&page);

        for action in MenuAction::ALL {
            let envelope = IpcEnvelope::from_json(&menu_message(action.id())).unwrap();
            let IpcEnvelope::Menu { action: id } = envelope else {
                panic!("{} did not parse as a menu message", action.id());
            };
            assert_eq!(MenuAction::from_id(&id), Some(action));
            assert!(
                page.contains(&format!(r#"value="{id}""#)),
                "toolbar menu lacks {id}"
            );
        }
    }

    #[test]
    fn toolbar_menu_message_runs_the_action() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());

        app.handle_ipc_message(&menu_message("view.zoom_in"));
        assert_eq!(app.zoom, 1.1);

        app.handle_ipc_message(&menu_message("view.format_disk"));
        assert_eq!(app.zoom, 1.1);
        assert!(!app.should_exit);

        app.handle_ipc_message(&menu_message("file.quit"));
        assert!(app.should_exit);
    }

    #[test]
    fn toolbar_reload_page_notifies_the_window() {
        let mut app = MusicboxApp::new(MusicboxConfig::default());
        app.host.attach_window(Arc::new(app.notify_tx.clone()));

        app.handle_ipc_message(&menu_message("cookies.reload"));

        assert_eq!(app.notify_rx.try_recv().ok(), Some(Notification::ReloadRequested));
    }
}
