//! Link resolution and crawl scoping
//!
//! Resolution works on plain strings rather than parsed URLs: each href is
//! absolutized against the seed's base URL by a fixed rule chain, and a
//! resolved link is in scope exactly when it starts with the base URL.
//! The prefix test conflates "same host" with "same path prefix" - a link
//! to a sibling path under a different sub-path than the seed is excluded
//! even when it lives on the same host. That is observable, documented
//! behavior and is kept as-is.

/// Absolutizes a raw href against the base URL.
///
/// Rules, applied in order:
/// - `/path` is root-relative: appended to the base URL.
/// - `./path` is appended with the leading `.` stripped.
/// - anything without an `http(s)://` scheme is treated as a
///   same-directory relative path.
/// - absolute `http://`/`https://` hrefs are used as-is.
///
/// Hrefs with schemes like `mailto:` or `tel:` are not special-cased;
/// they fall into the same-directory rule like any other relative path.
fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{base_url}{href}")
    } else if href.starts_with("./") {
        format!("{base_url}{}", &href[1..])
    } else if !href.starts_with("http://") && !href.starts_with("https://") {
        format!("{base_url}/{}", href.trim_start_matches('/'))
    } else {
        href.to_string()
    }
}

/// Resolves a raw href to a normalized absolute URL, or `None` when the
/// link is out of crawl scope.
///
/// `base_url` is the seed URL with any trailing slashes stripped. The
/// in-scope test is a plain string-prefix check against it; out-of-scope
/// links are silently discarded.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    let absolute = absolutize(base_url, href);
    absolute.starts_with(base_url).then_some(absolute)
}
