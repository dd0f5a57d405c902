// ABOUTME: Href resolution for extracted links.
// ABOUTME: Unwraps search-engine redirect links of the form /url?q=<target> into their target.

use once_cell::sync::Lazy;
use url::Url;

use crate::normalize::clean;

static REDIRECT_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://www.google.com/").expect("static base url"));

/// Clean an href and, when asked, replace a redirect link with its target.
pub fn resolve_href(href: &str, unwrap_redirects: bool) -> String {
    let href = clean(href);
    if unwrap_redirects {
        if let Some(target) = redirect_target(&href) {
            return target;
        }
    }
    href
}

/// Target of a `/url?q=...` (or `/url?url=...`) redirect, if `href` is one.
pub fn redirect_target(href: &str) -> Option<String> {
    let parsed = match Url::parse(href) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => REDIRECT_BASE.join(href).ok()?,
        Err(_) => return None,
    };
    let host = parsed.host_str()?;
    let is_engine_host = host == "google.com" || host.starts_with("www.google.") || host.starts_with("google.");
    if !is_engine_host || parsed.path() != "/url" {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(k, _)| k == "q" || k == "url")
        .map(|(_, v)| clean(&v))
        .filter(|v| !v.is_empty())
}
