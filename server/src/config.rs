//! Server configuration from CLI flags and environment variables.
//!
//! Content root layout:
//!
//! ```text
//! <root>/articles/*.html     book chapters
//! <root>/articles/res/*      chapter images
//! <root>/web/static/**       CSS, JS and the theme client's wasm bundle
//! <root>/website/*           top-level site pages
//! <root>/pages/<group>/*.html  page groups served at `/<group>/`
//! <root>/pages/<group>/res/*   page group images
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use theme::Theme;

use crate::goget::PackageTable;

pub const DEFAULT_PORT: u16 = 55555;
pub const DEFAULT_UPDATE_INTERVAL_HOURS: u64 = 24;
pub const DEFAULT_GENERATED_DIR: &str = "generated";

const SECONDS_PER_HOUR: u64 = 3600;

#[derive(Debug, Clone, Parser)]
#[command(name = "bookserver", version, about = "Serve the book, its assets and go-get vanity imports")]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Content root directory.
    #[arg(long, env = "BOOK_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Theme pages are rendered with when the reader has no `theme` cookie.
    /// Unset lets the browser pick from the OS preference.
    #[arg(long, env = "BOOK_THEME")]
    pub theme: Option<Theme>,

    /// YAML file with the go-get package table. The built-in table is used
    /// when absent.
    #[arg(long, env = "BOOK_PACKAGES")]
    pub packages: Option<PathBuf>,

    /// Do not open a browser window on startup.
    #[arg(long, env = "BOOK_NO_BROWSER")]
    pub no_browser: bool,

    /// Do not `git pull` the content root periodically.
    #[arg(long, env = "BOOK_NO_UPDATE")]
    pub no_update: bool,

    /// Hours between `git pull` runs.
    #[arg(long, env = "BOOK_UPDATE_INTERVAL_HOURS", default_value_t = DEFAULT_UPDATE_INTERVAL_HOURS)]
    pub update_interval_hours: u64,

    /// Write the whole site as static files into DIR and exit instead of
    /// serving.
    #[arg(long = "gen", value_name = "DIR", num_args = 0..=1, default_missing_value = DEFAULT_GENERATED_DIR)]
    pub generate: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read package table {path}: {source}")]
    ReadPackages {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse package table {path}: {source}")]
    ParsePackages {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("update interval must be at least one hour")]
    ZeroUpdateInterval,
    #[error("update interval of {0} hours is too large")]
    UpdateIntervalTooLarge(u64),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub root: PathBuf,
    pub default_theme: Option<Theme>,
    pub packages: PackageTable,
    pub open_browser: bool,
    /// `None` disables the periodic `git pull`.
    pub update_interval: Option<Duration>,
    /// Set when the site is to be generated into this directory instead of
    /// served.
    pub generate_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build the typed config, loading the package table if one is named.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let packages = match &cli.packages {
            Some(path) => load_packages(path)?,
            None => PackageTable::builtin(),
        };

        let update_interval = if cli.no_update {
            None
        } else if cli.update_interval_hours == 0 {
            return Err(ConfigError::ZeroUpdateInterval);
        } else {
            let secs = cli
                .update_interval_hours
                .checked_mul(SECONDS_PER_HOUR)
                .ok_or(ConfigError::UpdateIntervalTooLarge(cli.update_interval_hours))?;
            Some(Duration::from_secs(secs))
        };

        Ok(Self {
            port: cli.port,
            root: cli.root,
            default_theme: cli.theme,
            packages,
            open_browser: !cli.no_browser,
            update_interval,
            generate_dir: cli.generate,
        })
    }

    /// Config rooted at `root` with defaults everywhere else and no side
    /// effects on startup.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            root: root.into(),
            default_theme: None,
            packages: PackageTable::builtin(),
            open_browser: false,
            update_interval: None,
            generate_dir: None,
        }
    }

    #[must_use]
    pub fn articles_dir(&self) -> PathBuf {
        self.root.join("articles")
    }

    #[must_use]
    pub fn article_res_dir(&self) -> PathBuf {
        self.articles_dir().join("res")
    }

    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.root.join("web").join("static")
    }

    #[must_use]
    pub fn website_dir(&self) -> PathBuf {
        self.root.join("website")
    }

    #[must_use]
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    /// Directory of page group `group`, or `None` when the name could not
    /// be a single directory under `pages/`.
    #[must_use]
    pub fn group_dir(&self, group: &str) -> Option<PathBuf> {
        is_plain_name(group).then(|| self.pages_dir().join(group))
    }

    /// File `name` directly under `website/`, with the same name rules as
    /// [`Self::group_dir`].
    #[must_use]
    pub fn website_file(&self, name: &str) -> Option<PathBuf> {
        is_plain_name(name).then(|| self.website_dir().join(name))
    }
}

/// A single path component that is not hidden and not `..`.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

fn load_packages(path: &Path) -> Result<PackageTable, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadPackages { path: path.to_owned(), source })?;
    PackageTable::from_yaml(&raw).map_err(|source| ConfigError::ParsePackages { path: path.to_owned(), source })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
