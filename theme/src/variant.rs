//! The two theme variants.

use std::fmt;
use std::str::FromStr;

/// A visual configuration variant. `Dark` is the fallback when nothing else
/// decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Both variants, light first.
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The variant a click on the toggle switches to.
    ///
    /// Anything that is not dark becomes dark, so an unset page theme also
    /// toggles to dark.
    #[must_use]
    pub const fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(Self::Dark) => Self::Light,
            Some(Self::Light) | None => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseThemeError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;
