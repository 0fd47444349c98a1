//! Case correction for app-protocol URIs.
//!
//! RFC 3986 §3.2.2 makes the host subcomponent of a URI case-insensitive,
//! and the desktop URI plumbing lower-cases it accordingly. Slack compares
//! the host of its internal `slack://` URIs case-sensitively, so a
//! lower-cased workspace host silently fails to open the workspace. The fix
//! applied here is the inverse: force the authority back to upper case and
//! leave every other byte alone.

/// Upper-case the authority component of `url`, preserving everything else
/// byte-for-byte.
///
/// The authority runs from `scheme://` to the next `/`, `?`, or `#`. A URL
/// without a `://` separator, or with an empty authority, is returned
/// unchanged.
pub fn correct(url: &str) -> String {
    let Some(start) = url.find("://").map(|i| i + "://".len()) else {
        return url.to_string();
    };
    let tail = &url[start..];
    let end = start + tail.find(['/', '?', '#']).unwrap_or(tail.len());

    let authority = &url[start..end];
    if authority.is_empty() {
        return url.to_string();
    }

    let mut fixed = String::with_capacity(url.len());
    fixed.push_str(&url[..start]);
    fixed.push_str(&authority.to_uppercase());
    fixed.push_str(&url[end..]);
    fixed
}
