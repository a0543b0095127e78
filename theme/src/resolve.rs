//! Initial theme resolution.

use crate::variant::Theme;

/// Media query whose match means the OS prefers the light variant.
pub const PREFERS_LIGHT_QUERY: &str = "(prefers-color-scheme: light)";

/// Pick the theme a page starts with.
///
/// Precedence: the theme the page was rendered with, then the `theme`
/// cookie, then the OS color-scheme preference, then [`Theme::default`].
/// The OS preference can only select light; a dark or absent preference
/// falls through to the default.
#[must_use]
pub fn resolve(page: Option<Theme>, cookie: Option<Theme>, prefers_light: bool) -> Theme {
    page.or(cookie)
        .or(prefers_light.then_some(Theme::Light))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
