//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the bridge host, the two webviews of the
//! window and the application menu.

mod bridge;
mod cookies;
mod core;
mod event_handler;
mod init;
mod layout;
mod menu;
mod polling;
mod shutdown;
mod surfaces;
mod toolbar;
mod types;

pub use core::MusicboxApp;
