//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the config, the content store, the table of contents loaded at
//! startup and two rendered-page caches.
//!
//! The server runs in one of two modes, decided per request by the `Host`
//! header. Requests for `localhost` put it in local mode: caches are dropped
//! and every page is rendered fresh, so an author sees edits immediately.
//! Any other host (including `127.0.0.1`) gets cached pages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::HeaderValue;

use crate::cache::PageCache;
use crate::config::ServerConfig;
use crate::content::ContentStore;

const LOCAL_CACHE_CONTROL: &str = "no-cache, private, max-age=0";
/// About 14 hours.
const PUBLIC_CACHE_CONTROL: &str = "max-age=50000";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub content: ContentStore,
    /// Table of contents HTML from `101.html`.
    pub index: Arc<str>,
    pub article_pages: PageCache,
    pub goget_pages: PageCache,
    local_server: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, index: String) -> Self {
        let content = ContentStore::new(config.articles_dir());
        Self {
            config: Arc::new(config),
            content,
            index: index.into(),
            article_pages: PageCache::new(),
            goget_pages: PageCache::new(),
            local_server: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record the mode implied by the current request. Entering local mode
    /// clears the page caches. Returns whether the mode changed.
    pub fn confirm_local_server(&self, is_local: bool) -> bool {
        let was_local = self.local_server.swap(is_local, Ordering::AcqRel);
        if was_local == is_local {
            return false;
        }
        if is_local {
            self.article_pages.clear();
            self.goget_pages.clear();
        }
        tracing::info!(local = is_local, "server mode changed");
        true
    }

    #[must_use]
    pub fn is_local_server(&self) -> bool {
        self.local_server.load(Ordering::Acquire)
    }
}

/// `Cache-Control` for rendered pages in the given mode.
#[must_use]
pub fn page_cache_control(is_local: bool) -> HeaderValue {
    HeaderValue::from_static(if is_local { LOCAL_CACHE_CONTROL } else { PUBLIC_CACHE_CONTROL })
}

/// Whether a `Host` header names this machine by `localhost`.
#[must_use]
pub fn is_local_host(host: &str) -> bool {
    let hostname = host.split_once(':').map_or(host, |(name, _)| name);
    hostname == "localhost"
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::path::Path;

    pub const INDEX_HTML: &str = r#"<h1>Go 101</h1>
<!-- index starts (don't remove) -->
<ul>
<li><a class="index" href="101.html">Contents</a></li>
<li><a class="index" href="channel.html">Channels</a></li>
</ul>
<!-- index ends (don't remove) -->
"#;

    /// Lay out a tiny book under `root`: two chapters, one image, one static
    /// file and one website page.
    pub fn write_book(root: &Path) {
        let articles = root.join("articles");
        std::fs::create_dir_all(articles.join("res")).unwrap();
        std::fs::write(articles.join("101.html"), INDEX_HTML).unwrap();
        std::fs::write(
            articles.join("channel.html"),
            r#"<h1>Channels</h1><p>See <a href="https://go101.org/article/101.html">contents</a>.</p>"#,
        )
        .unwrap();
        std::fs::write(articles.join("res").join("pic.png"), b"\x89PNG").unwrap();

        let css = root.join("web").join("static").join("go101").join("css");
        std::fs::create_dir_all(&css).unwrap();
        std::fs::write(css.join("v993-dark.css"), "body{}").unwrap();

        std::fs::create_dir_all(root.join("website")).unwrap();
        std::fs::write(root.join("website").join("about.html"), "<p>about</p>").unwrap();

        let group = root.join("pages").join("apps-and-libs");
        std::fs::create_dir_all(group.join("res")).unwrap();
        std::fs::write(group.join("101.html"), GROUP_INDEX_HTML).unwrap();
        std::fs::write(group.join("golds.html"), "<h1>Golds</h1><p>docs and code reader</p>").unwrap();
        std::fs::write(group.join("res").join("golds.png"), b"\x89PNG").unwrap();
    }

    pub const GROUP_INDEX_HTML: &str = r#"<h1>Apps and Libs</h1>
<!-- index starts (don't remove) -->
<ul>
<li><a class="index" href="101.html">Apps and Libs</a></li>
<li><a class="index" href="golds.html">Golds</a></li>
</ul>
<!-- index ends (don't remove) -->
"#;

    /// State over a book written to `root`.
    pub fn test_app_state(root: &Path) -> AppState {
        test_app_state_with(ServerConfig::with_root(root))
    }

    /// State over a book written to `config.root`.
    pub fn test_app_state_with(config: ServerConfig) -> AppState {
        write_book(&config.root);
        let index = crate::content::extract_index(&crate::content::parse_article("101.html", INDEX_HTML)).unwrap();
        AppState::new(config, index)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
