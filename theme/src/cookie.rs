//! `theme` cookie codec.
//!
//! The cookie string is whatever `document.cookie` (or a `Cookie` request
//! header) returns: `key=value` pairs separated by `;`.

use crate::variant::Theme;

pub const COOKIE_NAME: &str = "theme";

/// Find the theme stored in a cookie string.
///
/// The last `theme` entry wins. Entries whose value is not a known variant
/// are ignored rather than ending the search with garbage.
pub fn parse_cookie_theme(cookies: &str) -> Option<Theme> {
    cookies
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.trim() != COOKIE_NAME {
                return None;
            }
            value.parse::<Theme>().ok()
        })
        .last()
}

/// The `document.cookie` assignment that persists a user-chosen theme.
#[must_use]
pub fn persist_cookie(theme: Theme) -> String {
    format!("{COOKIE_NAME}={theme}; path=/; SameSite=None; Secure")
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
