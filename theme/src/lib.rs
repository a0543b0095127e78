//! Book page theme client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled to WebAssembly with the `hydrate` feature and loaded by every
//! article page. Once the document is ready it rewrites absolute book links
//! to site-relative ones, resolves the light/dark theme, swaps the themed
//! stylesheets and wires the `#theme-switch` toggle.
//!
//! The browser-independent parts (variant, resolution precedence, cookie
//! codec, asset table, switcher state) compile everywhere and are shared with
//! the server, which renders the initial `<head>` from the same asset table.
//!
//! BUILD
//! =====
//! The server's pages import `/static/theme/theme.js`, so the bundle goes
//! into the book's `web/static/theme/`:
//!
//! ```text
//! cargo build -p theme --release --target wasm32-unknown-unknown --features hydrate
//! wasm-bindgen --target web --out-dir <root>/web/static/theme --out-name theme \
//!     target/wasm32-unknown-unknown/release/theme.wasm
//! ```

pub mod assets;
pub mod cookie;
pub mod href;
pub mod resolve;
pub mod switcher;
pub mod variant;

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod page;

pub use assets::{Asset, AssetKind, assets_for};
pub use resolve::resolve;
pub use switcher::{SwitchOrigin, ThemeHost, ThemeSwitcher};
pub use variant::{ParseThemeError, Theme};

/// Element id of the optional toggle control.
pub const THEME_SWITCH_ID: &str = "theme-switch";

/// Attribute on `<html>` carrying the site's configured theme, when it has one.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A logger installed by the host page wins.
    console_log::init_with_level(log::Level::Info).unwrap_or_default();
    page::run_when_ready();
}
