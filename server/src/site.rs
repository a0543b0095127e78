//! Whole pages rendered from content, shared by the router and the static
//! site generator.

use std::path::Path;

use bytes::Bytes;
use theme::Theme;

use crate::content::{ContentError, ContentStore, disable_article_link};
use crate::render;

/// Render `file` from `store` as a full page, with `index` as the table of
/// contents and the link to `file` in it disabled.
pub async fn article_page(
    store: &ContentStore,
    index: &str,
    file: &str,
    theme: Option<Theme>,
    is_local: bool,
) -> Result<Bytes, ContentError> {
    let article = store.load_article(file).await?;
    let index = disable_article_link(index, file);
    Ok(Bytes::from(render::article_page(&article, &index, theme, is_local).into_string()))
}

/// Render `file` from the page group in `dir`, indexed by the group's own
/// `101.html`.
pub async fn group_page(dir: &Path, file: &str, theme: Option<Theme>, is_local: bool) -> Result<Bytes, ContentError> {
    let store = ContentStore::new(dir);
    let index = store.load_group_index().await?;
    article_page(&store, &index, file, theme, is_local).await
}

/// Chapters that moved, and where they went.
pub const MOVED_ARTICLES: &[(&str, &str)] = &[
    ("go-sdk.html", "/article/go-toolchain.html"),
    ("tools.html", "/apps-and-libs/101.html"),
    ("tool-gold.html", "/apps-and-libs/golds.html"),
    ("tool-golds.html", "/apps-and-libs/golds.html"),
];

#[must_use]
pub fn moved_to(item: &str) -> Option<&'static str> {
    MOVED_ARTICLES
        .iter()
        .find(|(from, _)| *from == item)
        .map(|(_, to)| *to)
}

/// The meta-refresh page for a moved chapter.
#[must_use]
pub fn redirect_page(target: &str) -> Bytes {
    Bytes::from(render::redirect_page(target).into_string())
}
