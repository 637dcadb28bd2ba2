// src/content/url.rs
use crate::constants::{COMMON_TLDS, MAX_URL_LENGTH, MIN_URL_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;
use url::Url;

lazy_static! {
    static ref WWW_DOMAIN_REGEX: Regex = Regex::new(
        r"^www\.(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}(?:/.*)?$"
    )
    .expect("Failed to compile www domain regex");
    static ref BARE_DOMAIN_REGEX: Regex = Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}(?:/.*)?$"
    )
    .expect("Failed to compile bare domain regex");
    static ref DOMAIN_FALLBACK_REGEX: Regex =
        Regex::new(r"^(?:https?://)?(?:www\.)?([^/?]+)").expect("Failed to compile domain regex");
}

/// Decide whether `text` is a URL worth capturing.
///
/// Strict parsing is tried first, then `www.` hosts, then bare domains that
/// either use a common TLD or carry a path, query or fragment.
///
/// # Examples
///
/// ```
/// use clipnotes::content::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(is_valid_url("example.xyz"));
/// assert!(!is_valid_url("hello world"));
/// ```
pub fn is_valid_url(text: &str) -> bool {
    if text.contains('\n') || text.contains('\r') {
        return false;
    }

    let trimmed = text.trim();
    let length = trimmed.chars().count();
    if !(MIN_URL_LENGTH..=MAX_URL_LENGTH).contains(&length) {
        return false;
    }

    if trimmed.contains(' ') && !trimmed.contains("%20") {
        return false;
    }

    if Url::parse(trimmed).is_ok() {
        trace!(text = trimmed, "Accepted by strict URL parser");
        return true;
    }

    if WWW_DOMAIN_REGEX.is_match(trimmed) {
        return true;
    }

    if BARE_DOMAIN_REGEX.is_match(trimmed) {
        let tld = top_level_domain(trimmed);
        return COMMON_TLDS.contains(&tld.as_str())
            || trimmed.contains('/')
            || trimmed.contains('?')
            || trimmed.contains('#');
    }

    false
}

/// Last dot-separated segment with any path, query or fragment removed.
fn top_level_domain(text: &str) -> String {
    let last = text.rsplit('.').next().unwrap_or_default();
    last.split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Add an `https://` scheme where one is missing. Never fails.
///
/// ```
/// use clipnotes::content::url::normalize_url;
///
/// assert_eq!(normalize_url("www.foo.com"), "https://www.foo.com");
/// assert_eq!(normalize_url("https://foo.com"), "https://foo.com");
/// ```
pub fn normalize_url(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("www.") {
        return format!("https://{}", trimmed);
    }

    if trimmed.contains('.') && !trimmed.contains(' ') && trimmed.chars().count() > 4 {
        return format!("https://{}", trimmed);
    }

    trimmed.to_string()
}

/// Host part of a URL, used for link chips.
pub fn extract_domain(url: &str) -> String {
    if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        return host;
    }

    DOMAIN_FALLBACK_REGEX
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map_or_else(|| url.to_string(), |m| m.as_str().to_string())
}

pub fn favicon_url(url: &str) -> String {
    format!(
        "https://www.google.com/s2/favicons?domain={}&sz=32",
        extract_domain(url)
    )
}
