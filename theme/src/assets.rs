//! The four linked resources that make up a theme.
//!
//! Ids are shared by both variants so switching replaces each element in
//! place. The server renders the initial `<head>` from this same table.

use crate::variant::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Element id, stable across variants.
    pub id: &'static str,
    pub kind: AssetKind,
    pub href: &'static str,
}

impl Asset {
    const fn css(id: &'static str, href: &'static str) -> Self {
        Self { id, kind: AssetKind::Stylesheet, href }
    }

    const fn js(id: &'static str, href: &'static str) -> Self {
        Self { id, kind: AssetKind::Script, href }
    }
}

pub const BOOTSTRAP_ID: &str = "css-bs";
pub const PRISM_CSS_ID: &str = "css-prism";
pub const PRISM_JS_ID: &str = "js-prism";
pub const BOOK_CSS_ID: &str = "css-go101";

const LIGHT: [Asset; 4] = [
    Asset::css(BOOTSTRAP_ID, "/static/bootstrap/v4.5.0/css/bootstrap.min.css"),
    Asset::css(PRISM_CSS_ID, "/static/prism/2020-08-03-light/prism.css"),
    Asset::js(PRISM_JS_ID, "/static/prism/2020-08-03-light/prism.js"),
    Asset::css(BOOK_CSS_ID, "/static/go101/css/v993-light.css"),
];

const DARK: [Asset; 4] = [
    Asset::css(BOOTSTRAP_ID, "/static/bootstrap/v4.0.3-dark/css/bootstrap.min.css"),
    Asset::css(PRISM_CSS_ID, "/static/prism/2020-08-03-dark/prism.css"),
    Asset::js(PRISM_JS_ID, "/static/prism/2020-08-03-dark/prism.js"),
    Asset::css(BOOK_CSS_ID, "/static/go101/css/v993-dark.css"),
];

/// Resources for `theme`, in load order.
#[must_use]
pub const fn assets_for(theme: Theme) -> [Asset; 4] {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}
