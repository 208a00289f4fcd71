use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use musicbox_common::StorageError;
use tokio::sync::RwLock;
use tracing::debug;

use super::matching::{build_record, domain_matches, parse_scope, path_matches};
use super::CookieStore;
use crate::cookie::{CookieDetails, CookieRecord};

type Clock = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Session-scoped cookie jar held in memory.
///
/// Cookies keep insertion order; replacing a cookie keeps its slot. Expired
/// cookies are never returned and are pruned whenever the jar is read.
pub struct MemoryCookieStore {
    cookies: RwLock<Vec<CookieRecord>>,
    clock: Clock,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(|| {
            chrono::Utc::now().timestamp_millis() as f64 / 1000.0
        }))
    }

    /// Store whose notion of "now" (seconds since the epoch) is `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            cookies: RwLock::new(Vec::new()),
            clock,
        }
    }

    fn now(&self) -> f64 {
        (self.clock)()
    }

    async fn live(&self) -> tokio::sync::RwLockWriteGuard<'_, Vec<CookieRecord>> {
        let now = self.now();
        let mut cookies = self.cookies.write().await;
        let before = cookies.len();
        cookies.retain(|c| !c.is_expired_at(now));
        if cookies.len() != before {
            debug!(pruned = before - cookies.len(), "expired cookies pruned");
        }
        cookies
    }
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryCookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCookieStore").finish_non_exhaustive()
    }
}

fn same_identity(a: &CookieRecord, b: &CookieRecord) -> bool {
    a.name == b.name && a.domain == b.domain && a.path == b.path
}

fn sent_to(cookie: &CookieRecord, host: &str, path: &str, secure: bool) -> bool {
    let domain_ok = if cookie.host_only {
        cookie.domain == host
    } else {
        domain_matches(host, cookie.bare_domain())
    };
    domain_ok && path_matches(path, &cookie.path) && (secure || !cookie.secure)
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn get(&self, url: &str) -> Result<Vec<CookieRecord>, StorageError> {
        let scope = parse_scope(url)?;
        let cookies = self.live().await;
        let mut matched: Vec<CookieRecord> = cookies
            .iter()
            .filter(|c| sent_to(c, &scope.host, &scope.path, scope.secure))
            .cloned()
            .collect();
        // Stable: equal path lengths keep insertion order.
        matched.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        Ok(matched)
    }

    async fn get_all(&self) -> Result<Vec<CookieRecord>, StorageError> {
        Ok(self.live().await.clone())
    }

    async fn set(&self, details: CookieDetails) -> Result<(), StorageError> {
        let record = build_record(details)?;
        let now = self.now();
        let mut cookies = self.cookies.write().await;

        if record.is_expired_at(now) {
            cookies.retain(|c| !same_identity(c, &record));
            debug!(name = %record.name, domain = %record.domain, "cookie expired on set");
            return Ok(());
        }

        match cookies.iter_mut().find(|c| same_identity(c, &record)) {
            Some(existing) => *existing = record,
            None => cookies.push(record),
        }
        Ok(())
    }

    async fn remove(&self, url: &str, name: &str) -> Result<(), StorageError> {
        let scope = parse_scope(url)?;
        let mut cookies = self.cookies.write().await;
        let before = cookies.len();
        // Removal ignores the secure flag so http scopes can delete too.
        cookies.retain(|c| !(c.name == name && sent_to(c, &scope.host, &scope.path, true)));
        debug!(name, removed = before - cookies.len(), "cookie remove");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut cookies = self.cookies.write().await;
        let dropped = cookies.len();
        cookies.clear();
        debug!(dropped, "cookie store cleared");
        Ok(())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.live().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::SameSite;
    use std::sync::atomic::{AtomicU64, Ordering};

    const HOME: &str = "https://music.apple.com";

    fn fixed_clock(seconds: u64) -> (Arc<AtomicU64>, MemoryCookieStore) {
        let now = Arc::new(AtomicU64::new(seconds));
        let reader = Arc::clone(&now);
        let store =
            MemoryCookieStore::with_clock(Arc::new(move || reader.load(Ordering::SeqCst) as f64));
        (now, store)
    }

    #[tokio::test]
    async fn host_only_cookie_defaults() {
        let store = MemoryCookieStore::new();
        store
            .set(CookieDetails::new(HOME, "session", "abc"))
            .await
            .unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        let cookie = &all[0];
        assert_eq!(cookie.domain, "music.apple.com");
        assert!(cookie.host_only);
        assert_eq!(cookie.path, "/");
        assert!(cookie.session);
        assert!(!cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Unspecified);
    }

    #[tokio::test]
    async fn domain_cookie_reaches_subdomains() {
        let store = MemoryCookieStore::new();
        store
            .set(CookieDetails::new(HOME, "itua", "us").with_domain(".Apple.com"))
            .await
            .unwrap();

        let cookie = &store.get_all().await.unwrap()[0];
        assert_eq!(cookie.domain, ".apple.com");
        assert!(!cookie.host_only);

        assert_eq!(store.get("https://apple.com").await.unwrap().len(), 1);
        assert_eq!(store.get("https://idmsa.apple.com/x").await.unwrap().len(), 1);
        assert!(store.get("https://example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn host_only_cookie_skips_subdomains() {
        let store = MemoryCookieStore::new();
        store
            .set(CookieDetails::new("https://apple.com", "a", "1"))
            .await
            .unwrap();
        assert!(store.get("https://music.apple.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_domain_is_rejected() {
        let store = MemoryCookieStore::new();
        let err = store
            .set(CookieDetails::new(HOME, "a", "1").with_domain("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidCookie(_)));
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn suffix_wide_cookie_never_reaches_other_sites() {
        let store = MemoryCookieStore::new();
        let err = store
            .set(CookieDetails::new(HOME, "tracker", "1").with_domain("com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidCookie(_)));
        assert!(store.get("https://evil-example.com/").await.unwrap().is_empty());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_input_is_rejected() {
        let store = MemoryCookieStore::new();
        assert!(matches!(
            store.set(CookieDetails::new("nope", "a", "1")).await,
            Err(StorageError::InvalidUrl(_))
        ));
        assert!(matches!(
            store.set(CookieDetails::new(HOME, "", "1")).await,
            Err(StorageError::InvalidCookie(_))
        ));
        assert!(matches!(
            store.set(CookieDetails::new(HOME, "a", "x;y")).await,
            Err(StorageError::InvalidCookie(_))
        ));
        assert!(matches!(store.get("::").await, Err(StorageError::InvalidUrl(_))));
        assert!(matches!(
            store.remove("::", "a").await,
            Err(StorageError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn secure_rules() {
        let store = MemoryCookieStore::new();
        assert!(store
            .set(CookieDetails::new("http://music.apple.com", "a", "1").with_secure(true))
            .await
            .is_err());
        assert!(store
            .set(CookieDetails::new(HOME, "b", "1").with_same_site(SameSite::NoRestriction))
            .await
            .is_err());

        store
            .set(
                CookieDetails::new(HOME, "c", "1")
                    .with_secure(true)
                    .with_same_site(SameSite::NoRestriction),
            )
            .await
            .unwrap();
        assert_eq!(store.get(HOME).await.unwrap().len(), 1);
        assert!(store.get("http://music.apple.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_replaces_in_place() {
        let store = MemoryCookieStore::new();
        store.set(CookieDetails::new(HOME, "a", "1")).await.unwrap();
        store.set(CookieDetails::new(HOME, "b", "2")).await.unwrap();
        store.set(CookieDetails::new(HOME, "a", "3")).await.unwrap();

        let all = store.get_all().await.unwrap();
        let pairs: Vec<_> = all.iter().map(|c| (c.name.as_str(), c.value.as_str())).collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[tokio::test]
    async fn same_name_different_path_coexist() {
        let store = MemoryCookieStore::new();
        store.set(CookieDetails::new(HOME, "a", "root")).await.unwrap();
        store
            .set(CookieDetails::new(HOME, "a", "lib").with_path("/library"))
            .await
            .unwrap();

        let at_library = store.get("https://music.apple.com/library/songs").await.unwrap();
        let values: Vec<_> = at_library.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["lib", "root"]);

        let at_root = store.get(HOME).await.unwrap();
        assert_eq!(at_root.len(), 1);
        assert_eq!(at_root[0].value, "root");
    }

    #[tokio::test]
    async fn expired_cookies_are_hidden_and_pruned() {
        let (now, store) = fixed_clock(1_000);
        store
            .set(CookieDetails::new(HOME, "short", "1").with_expiration(1_500.0))
            .await
            .unwrap();
        store.set(CookieDetails::new(HOME, "keep", "1")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(!store.get_all().await.unwrap()[0].session);

        now.store(2_000, Ordering::SeqCst);
        let names: Vec<_> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["keep"]);
        assert!(store.cookies.read().await.len() == 1);
    }

    #[tokio::test]
    async fn past_expiry_deletes_existing_cookie() {
        let (_now, store) = fixed_clock(1_000);
        store.set(CookieDetails::new(HOME, "a", "1")).await.unwrap();
        store
            .set(CookieDetails::new(HOME, "a", "").with_expiration(10.0))
            .await
            .unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryCookieStore::new();
        store.set(CookieDetails::new(HOME, "a", "1")).await.unwrap();
        store.set(CookieDetails::new(HOME, "b", "1")).await.unwrap();

        store.remove(HOME, "a").await.unwrap();
        store.remove(HOME, "a").await.unwrap();
        store.remove(HOME, "never-set").await.unwrap();

        let names: Vec<_> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["b"]);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = MemoryCookieStore::new();
        store.set(CookieDetails::new(HOME, "a", "1")).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
