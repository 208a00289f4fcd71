//! The content surface's cookie jar, serving the host's cookie store.
//!
//! Reads come from the engine's own jar. The engine offers no cookie
//! writer, so writes go through `document.cookie` in the page currently
//! shown: only cookies that page could set itself (same site, not
//! http-only) can be written or removed. Clearing drops all browsing data.

use musicbox_bridge::store::CookieJob;
use musicbox_bridge::{CookieRecord, SameSite};
use musicbox_common::StorageError;
use tracing::debug;
use url::Url;

use crate::manager::WebViewHandle;

/// A cookie as the engine reports it.
#[derive(Debug, Clone, Default)]
pub struct EngineCookie<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Without the leading dot.
    pub domain: Option<&'a str>,
    pub path: Option<&'a str>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    /// `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Seconds since the UNIX epoch.
    pub expires: Option<f64>,
}

/// Convert an engine cookie. `fallback_host` names the host of cookies the
/// engine reports without a domain.
pub fn to_record(cookie: EngineCookie<'_>, fallback_host: &str) -> CookieRecord {
    let (domain, host_only) = match cookie.domain.map(|d| d.trim_start_matches('.')) {
        Some(d) if !d.is_empty() => (format!(".{}", d.to_ascii_lowercase()), false),
        _ => (fallback_host.to_string(), true),
    };
    let same_site = match cookie.same_site.as_deref() {
        Some(s) if s.eq_ignore_ascii_case("strict") => SameSite::Strict,
        Some(s) if s.eq_ignore_ascii_case("lax") => SameSite::Lax,
        Some(s) if s.eq_ignore_ascii_case("none") => SameSite::NoRestriction,
        _ => SameSite::Unspecified,
    };
    CookieRecord {
        name: cookie.name.to_string(),
        value: cookie.value.to_string(),
        domain,
        host_only,
        path: cookie.path.unwrap_or("/").to_string(),
        secure: cookie.secure.unwrap_or(false),
        http_only: cookie.http_only.unwrap_or(false),
        session: cookie.expires.is_none(),
        expiration_date: cookie.expires,
        same_site,
    }
}

/// `Set-Cookie`-style string for `record`, with the expiry as `Max-Age`
/// relative to `now`.
pub fn cookie_string(record: &CookieRecord, now: f64) -> String {
    let mut out = format!("{}={}", record.name, record.value);
    if !record.host_only {
        out.push_str(&format!("; Domain={}", record.bare_domain()));
    }
    out.push_str(&format!("; Path={}", record.path));
    if let Some(exp) = record.expiration_date {
        let max_age = (exp - now).ceil().max(0.0) as i64;
        out.push_str(&format!("; Max-Age={max_age}"));
    }
    if record.secure {
        out.push_str("; Secure");
    }
    match record.same_site {
        SameSite::Strict => out.push_str("; SameSite=Strict"),
        SameSite::Lax => out.push_str("; SameSite=Lax"),
        SameSite::NoRestriction => out.push_str("; SameSite=None"),
        SameSite::Unspecified => {}
    }
    out
}

/// Script that writes `record` into the page's jar.
pub fn js_write_cookie(record: &CookieRecord, now: f64) -> String {
    js_assign(&cookie_string(record, now))
}

/// Script that expires `record`. Domain cookies are also expired host-only,
/// since the engine does not say which of the two it holds.
pub fn js_expire_cookie(record: &CookieRecord) -> String {
    let mut expired = record.clone();
    expired.value.clear();
    expired.expiration_date = None;
    let tail = if record.secure { "; Max-Age=0; Secure" } else { "; Max-Age=0" };

    let mut js = js_assign(&format!("{}{tail}", cookie_string(&expired, 0.0)));
    if !record.host_only {
        expired.host_only = true;
        js.push_str(&js_assign(&format!("{}{tail}", cookie_string(&expired, 0.0))));
    }
    js
}

fn js_assign(cookie: &str) -> String {
    let literal = serde_json::to_string(cookie).unwrap_or_else(|_| "\"\"".to_string());
    format!("document.cookie = {literal};")
}

/// Check that a page at `page_url` could set `record` itself.
pub fn writable_from(page_url: &str, record: &CookieRecord) -> Result<(), StorageError> {
    if record.http_only {
        return Err(StorageError::Backend(format!(
            "http-only cookie `{}` cannot be written by the embedded engine",
            record.name
        )));
    }
    let page = Url::parse(page_url)
        .map_err(|e| StorageError::Backend(format!("content page has no usable URL: {e}")))?;
    let host = page.host_str().unwrap_or_default().to_ascii_lowercase();
    let covered = if record.host_only {
        record.domain == host
    } else {
        let bare = record.bare_domain();
        host == bare || host.ends_with(&format!(".{bare}"))
    };
    if !covered {
        return Err(StorageError::Backend(format!(
            "cookie for `{}` cannot be written while the content page is on `{host}`",
            record.bare_domain()
        )));
    }
    if record.secure && page.scheme() != "https" {
        return Err(StorageError::Backend(format!(
            "secure cookie `{}` needs an https content page",
            record.name
        )));
    }
    Ok(())
}

fn engine_error(e: wry::Error) -> StorageError {
    StorageError::Backend(format!("engine: {e}"))
}

fn now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

impl WebViewHandle {
    /// Cookies in the engine's jar, for `url` or all of them.
    pub fn cookies(&self, url: Option<&str>) -> Result<Vec<CookieRecord>, StorageError> {
        let webview = self.inner();
        let (cookies, fallback_host) = match url {
            Some(u) => {
                let host = Url::parse(u)
                    .ok()
                    .and_then(|p| p.host_str().map(str::to_ascii_lowercase))
                    .unwrap_or_default();
                (webview.cookies_for_url(u).map_err(engine_error)?, host)
            }
            None => (webview.cookies().map_err(engine_error)?, String::new()),
        };
        Ok(cookies
            .iter()
            .map(|c| {
                to_record(
                    EngineCookie {
                        name: c.name(),
                        value: c.value(),
                        domain: c.domain(),
                        path: c.path(),
                        secure: c.secure(),
                        http_only: c.http_only(),
                        same_site: c.same_site().map(|s| s.to_string()),
                        expires: c.expires_datetime().map(|t| t.unix_timestamp() as f64),
                    },
                    &fallback_host,
                )
            })
            .collect())
    }

    pub fn write_cookie(&self, record: &CookieRecord) -> Result<(), StorageError> {
        writable_from(self.current_url(), record)?;
        self.evaluate_script(&js_write_cookie(record, now()))
            .map_err(engine_error)
    }

    /// Expire cookies named `name` that the engine would send to `url`.
    pub fn remove_cookie(&self, url: &str, name: &str) -> Result<(), StorageError> {
        let matched: Vec<CookieRecord> = self
            .cookies(Some(url))?
            .into_iter()
            .filter(|c| c.name == name)
            .collect();
        for record in &matched {
            writable_from(self.current_url(), record)?;
        }
        for record in &matched {
            self.evaluate_script(&js_expire_cookie(record))
                .map_err(engine_error)?;
        }
        debug!(name, removed = matched.len(), "engine cookie remove");
        Ok(())
    }
}

/// Answer `job` against the content surface, or fail it when there is none.
pub fn serve_job(content: Option<&WebViewHandle>, job: CookieJob) {
    let Some(handle) = content else {
        job.fail(StorageError::Backend("content surface is not available".into()));
        return;
    };
    // A dropped reply means the request's caller went away; nothing to do.
    match job {
        CookieJob::Get { url, reply } => {
            let _ = reply.send(handle.cookies(Some(&url)));
        }
        CookieJob::GetAll { reply } => {
            let _ = reply.send(handle.cookies(None));
        }
        CookieJob::Set { record, reply, .. } => {
            let _ = reply.send(handle.write_cookie(&record));
        }
        CookieJob::Remove { url, name, reply } => {
            let _ = reply.send(handle.remove_cookie(&url, &name));
        }
        CookieJob::Clear { reply } => {
            let _ = reply.send(handle.clear_browsing_data().map_err(engine_error));
        }
    }
}
