//! The control channel between the privileged host and the UI surface.
//!
//! - [`Command`] / [`Request`]: the closed set of operations the UI may ask for
//! - [`Outcome`]: exactly one success-or-failure answer per request
//! - [`Notification`]: unsolicited host broadcasts (`cookies-cleared`,
//!   `reload-requested`)
//! - [`HostController`]: owns the cookie store and the active window, and
//!   dispatches requests to handlers
//! - [`BridgeClient`]: the typed, capability-free surface handed to UI code

pub mod client;
pub mod command;
pub mod cookie;
pub mod host;
pub mod notification;
pub mod outcome;
pub mod store;

pub use client::BridgeClient;
pub use command::{Command, Request};
pub use cookie::{CookieDetails, CookieRecord, SameSite};
pub use host::{AppInfo, HostController, NotificationSink, PendingRequest};
pub use notification::{Notification, NotificationHub, Subscription};
pub use outcome::Outcome;
pub use store::{CookieJob, CookieStore, EngineCookieStore, MemoryCookieStore};
