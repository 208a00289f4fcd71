//! Session cookie storage behind the host controller.
//!
//! [`EngineCookieStore`] serves the running app from the content engine's
//! jar; [`MemoryCookieStore`] keeps cookies in process.

mod engine;
mod matching;
mod memory;

pub use engine::{CookieJob, EngineCookieStore};
pub use memory::MemoryCookieStore;

use async_trait::async_trait;
use musicbox_common::StorageError;

use crate::cookie::{CookieDetails, CookieRecord};

/// Cookie storage owned exclusively by the host controller.
///
/// Calls may overlap; implementations must tolerate concurrent use without
/// relying on callers to serialize them.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Cookies that would be sent to `url`, most specific path first.
    async fn get(&self, url: &str) -> Result<Vec<CookieRecord>, StorageError>;

    /// Every live cookie in the store.
    async fn get_all(&self) -> Result<Vec<CookieRecord>, StorageError>;

    /// Insert or replace a cookie.
    async fn set(&self, details: CookieDetails) -> Result<(), StorageError>;

    /// Remove cookies named `name` that would be sent to `url`.
    /// Removing a cookie that does not exist succeeds.
    async fn remove(&self, url: &str, name: &str) -> Result<(), StorageError>;

    /// Drop every cookie.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Number of live cookies.
    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.get_all().await?.len())
    }
}
