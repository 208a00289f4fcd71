//! Cookie scope rules: URL parsing, domain and path matching, attribute checks.

use musicbox_common::StorageError;
use url::Url;

use crate::cookie::{CookieDetails, CookieRecord, SameSite};

/// A parsed http(s) request scope.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub host: String,
    pub path: String,
    pub secure: bool,
}

pub(crate) fn parse_scope(raw: &str) -> Result<Scope, StorageError> {
    let url = Url::parse(raw).map_err(|e| StorageError::InvalidUrl(format!("{raw}: {e}")))?;
    let secure = match url.scheme() {
        "https" => true,
        "http" => false,
        other => {
            return Err(StorageError::InvalidUrl(format!(
                "{raw}: unsupported scheme `{other}`"
            )))
        }
    };
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| StorageError::InvalidUrl(format!("{raw}: missing host")))?
        .to_ascii_lowercase();

    Ok(Scope {
        host,
        path: url.path().to_string(),
        secure,
    })
}

/// `host` domain-matches `domain` if equal or a subdomain of it.
pub(crate) fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
}

/// Directory of the request path, used when a cookie names no path.
pub(crate) fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

pub(crate) fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/'))
}

pub(crate) fn validate_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidCookie("name must not be empty".into()));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || c.is_whitespace() || *c == ';' || *c == '=')
    {
        return Err(StorageError::InvalidCookie(format!(
            "name `{name}` contains forbidden character {c:?}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_value(value: &str) -> Result<(), StorageError> {
    if let Some(c) = value.chars().find(|c| c.is_control() || *c == ';') {
        return Err(StorageError::InvalidCookie(format!(
            "value contains forbidden character {c:?}"
        )));
    }
    Ok(())
}

/// Whether cookies scoped to `domain` would span unrelated sites:
/// single-label names and registry suffixes such as `com` or `co.uk`.
pub(crate) fn is_public_suffix(domain: &str) -> bool {
    !domain.contains('.') || psl::suffix_str(domain) == Some(domain)
}

/// Validate `details` and resolve the record the store keeps for them.
pub(crate) fn build_record(details: CookieDetails) -> Result<CookieRecord, StorageError> {
    let scope = parse_scope(&details.url)?;

    let name = details.name.unwrap_or_default();
    validate_name(&name)?;
    let value = details.value.unwrap_or_default();
    validate_value(&value)?;

    let (domain, host_only) = match details.domain.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => {
            let bare = d.trim_start_matches('.').to_ascii_lowercase();
            if bare.is_empty() || !domain_matches(&scope.host, &bare) {
                return Err(StorageError::InvalidCookie(format!(
                    "domain `{d}` does not cover host `{}`",
                    scope.host
                )));
            }
            if !is_public_suffix(&bare) {
                (format!(".{bare}"), false)
            } else if bare == scope.host {
                // A host that is itself a suffix (`localhost`) keeps its own cookies.
                (scope.host.clone(), true)
            } else {
                return Err(StorageError::InvalidCookie(format!(
                    "domain `{d}` is a public suffix"
                )));
            }
        }
        _ => (scope.host.clone(), true),
    };

    let path = match details.path {
        Some(p) if p.starts_with('/') => p,
        _ => default_path(&scope.path),
    };

    let secure = details.secure.unwrap_or(false);
    if secure && !scope.secure {
        return Err(StorageError::InvalidCookie(format!(
            "secure cookie `{name}` cannot be set from {}",
            details.url
        )));
    }

    let same_site = details.same_site.unwrap_or_default();
    if same_site == SameSite::NoRestriction && !secure {
        return Err(StorageError::InvalidCookie(format!(
            "cookie `{name}` with sameSite=no_restriction must be secure"
        )));
    }

    if let Some(exp) = details.expiration_date {
        if !exp.is_finite() {
            return Err(StorageError::InvalidCookie(format!(
                "cookie `{name}` has a non-finite expiration date"
            )));
        }
    }

    Ok(CookieRecord {
        name,
        value,
        domain,
        host_only,
        path,
        secure,
        http_only: details.http_only.unwrap_or(false),
        session: details.expiration_date.is_none(),
        expiration_date: details.expiration_date,
        same_site,
    })
}
