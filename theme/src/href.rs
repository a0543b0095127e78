//! Absolute book links become site-relative.
//!
//! Article sources link to each other with full `https://go101.org/...`
//! URLs so they also work when read elsewhere. On a served page those links
//! should stay on whatever host is serving the book, including a local copy.

/// Anchors whose href contains this are rewritten.
pub const HREF_SELECTOR_MARKER: &str = "/go101.org/";

/// Everything up to and including this is cut from a matching href.
pub const HREF_STRIP_MARKER: &str = "/go101.org";

/// CSS selector for the anchors the rewrite applies to.
pub const ANCHOR_SELECTOR: &str = r#"a[href*="/go101.org/"]"#;

/// The site-relative form of `href`, or `None` when it does not point at the
/// book host.
pub fn rewrite_href(href: &str) -> Option<&str> {
    if !href.contains(HREF_SELECTOR_MARKER) {
        return None;
    }
    let start = href.find(HREF_STRIP_MARKER)? + HREF_STRIP_MARKER.len();
    Some(&href[start..])
}

#[cfg(test)]
#[path = "href_test.rs"]
mod tests;
