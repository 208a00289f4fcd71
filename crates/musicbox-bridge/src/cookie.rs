//! Cookie records as exchanged across the bridge.
//!
//! Field names serialize in camelCase so the JavaScript side sees the same
//! shape the embedding platform uses for its own cookie objects.

use serde::{Deserialize, Serialize};

/// Cross-site sending policy of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    #[default]
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

/// A stored cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    /// Host for host-only cookies, `.domain` otherwise.
    pub domain: String,
    pub host_only: bool,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    /// `true` when the cookie has no expiry and lives for the session only.
    pub session: bool,
    /// Seconds since the UNIX epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
    #[serde(default)]
    pub same_site: SameSite,
}

impl CookieRecord {
    /// Domain without the leading dot used for domain cookies.
    pub fn bare_domain(&self) -> &str {
        self.domain.trim_start_matches('.')
    }

    /// Whether the cookie has expired at `now` (seconds since the epoch).
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.expiration_date.is_some_and(|exp| exp <= now)
    }
}

/// Arguments of a `set-cookie` request. Only `url` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CookieDetails {
    /// URL the cookie is associated with; supplies the default domain and path.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

impl CookieDetails {
    /// Details for a plain `name=value` cookie scoped to `url`.
    pub fn new(url: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: Some(name.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn with_expiration(mut self, seconds_since_epoch: f64) -> Self {
        self.expiration_date = Some(seconds_since_epoch);
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}
