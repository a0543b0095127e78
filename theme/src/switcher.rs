//! Page-lifetime theme state and the switch/toggle transitions.
//!
//! DESIGN
//! ======
//! `ThemeSwitcher` owns the active variant and talks to the page through
//! `ThemeHost`. The browser implementation lives in `dom`; tests use a
//! recording host. Element loads are fire-and-forget: a resource that fails
//! to load is not retried and the state still reports the new variant.

use crate::assets::{AssetKind, assets_for};
use crate::cookie::persist_cookie;
use crate::variant::Theme;

/// Side effects a theme switch needs from the page.
pub trait ThemeHost {
    /// Replace the element with `id` by a stylesheet link to `href`.
    fn load_stylesheet(&mut self, id: &str, href: &str);
    /// Replace the element with `id` by a script loaded from `href`.
    fn load_script(&mut self, id: &str, href: &str);
    /// Assign `cookie` to the document's cookie store.
    fn write_cookie(&mut self, cookie: &str);
}

/// Who asked for a switch. Only user-initiated switches are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOrigin {
    Resolved,
    User,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeSwitcher {
    current: Option<Theme>,
}

impl ThemeSwitcher {
    /// Start from the theme the page was rendered with, if any.
    #[must_use]
    pub const fn new(page: Option<Theme>) -> Self {
        Self { current: page }
    }

    #[must_use]
    pub const fn current(&self) -> Option<Theme> {
        self.current
    }

    /// Make `target` the active theme.
    ///
    /// Returns `false` without touching the host when `target` is already
    /// active.
    pub fn switch(&mut self, host: &mut impl ThemeHost, target: Theme, origin: SwitchOrigin) -> bool {
        if self.current == Some(target) {
            return false;
        }
        self.current = Some(target);

        for asset in assets_for(target) {
            match asset.kind {
                AssetKind::Stylesheet => host.load_stylesheet(asset.id, asset.href),
                AssetKind::Script => host.load_script(asset.id, asset.href),
            }
        }

        if origin == SwitchOrigin::User {
            host.write_cookie(&persist_cookie(target));
        }
        true
    }

    /// Flip to the other theme on behalf of the user and return it.
    pub fn toggle(&mut self, host: &mut impl ThemeHost) -> Theme {
        let next = Theme::toggled(self.current);
        self.switch(host, next, SwitchOrigin::User);
        next
    }
}

#[cfg(test)]
#[path = "switcher_test.rs"]
mod tests;
