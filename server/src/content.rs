//! Article loading and the HTML surgery done on book chapters.
//!
//! DESIGN
//! ======
//! Chapters are hand-written HTML fragments. The first `<h1>` is the title;
//! `101.html` doubles as the table of contents, delimited by marker
//! comments. Everything here is plain string work on those conventions, so
//! a chapter that breaks them degrades (no title, no index) rather than
//! failing the request.

use std::path::PathBuf;

use tracing::{debug, warn};

pub const INDEX_ARTICLE: &str = "101.html";

const H1_OPEN: &str = "<h1>";
const H1_CLOSE: &str = "</h1>";
/// The closing tag must end within this many bytes of the opening tag.
const MAX_TITLE_LEN: usize = 128;

pub const INDEX_START: &str = "<!-- index starts (don't remove) -->";
pub const INDEX_END: &str = "<!-- index ends (don't remove) -->";
const PRINT_COMMENT_OPEN: &str = "<!-- (to remove) for printing";
const PRINT_COMMENT_CLOSE: &str = "(to remove) -->";
const LINE_TO_REMOVE: &str = "(to remove)";
const INDEX_LINK: &str = r#"<li><a class="index" href=""#;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("article {0} not found")]
    NotFound(String),
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{marker:?} not found in {article}")]
    MissingMarker { article: String, marker: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// Body HTML after the title.
    pub content: String,
    /// The `<h1>...</h1>` element, tags included. Empty when missing.
    pub title: String,
    pub title_without_tags: String,
    pub filename: String,
    pub filename_without_ext: String,
}

/// Split a chapter into title and body.
#[must_use]
pub fn parse_article(file: &str, raw: &str) -> Article {
    let mut article = Article {
        content: raw.to_owned(),
        filename: file.to_owned(),
        filename_without_ext: file.strip_suffix(".html").unwrap_or(file).to_owned(),
        ..Article::default()
    };

    let title_end = raw.find(H1_OPEN).and_then(|open| {
        let inner = open + H1_OPEN.len();
        let close = raw[inner..].find(H1_CLOSE)?;
        (close + H1_CLOSE.len() <= MAX_TITLE_LEN).then_some((open, inner + close + H1_CLOSE.len()))
    });

    match title_end {
        Some((open, end)) => {
            article.title = raw[open..end].to_owned();
            article.title_without_tags = strip_tags(&article.title);
            article.content = raw[end..].to_owned();
        }
        None => warn!(article = %article.filename_without_ext, "article title not found"),
    }
    article
}

/// Drop every `<...>` run.
fn strip_tags(html: &str) -> String {
    let mut in_tag = false;
    html.chars()
        .filter(|&c| match (in_tag, c) {
            (false, '<') | (true, '>') => {
                in_tag = !in_tag;
                false
            }
            (inside, _) => !inside,
        })
        .collect()
}

/// The table of contents section of the index article, with the
/// print-only comment markers blanked out so the links inside render.
pub fn extract_index(index_article: &Article) -> Result<String, ContentError> {
    let missing = |marker| ContentError::MissingMarker { article: index_article.filename.clone(), marker };
    let content = &index_article.content;
    let start = content.find(INDEX_START).ok_or_else(|| missing(INDEX_START))? + INDEX_START.len();
    let len = content[start..].find(INDEX_END).ok_or_else(|| missing(INDEX_END))?;

    let mut index = content[start..start + len].to_owned();
    for marker in [PRINT_COMMENT_OPEN, PRINT_COMMENT_CLOSE] {
        if let Some(at) = index.find(marker) {
            index.replace_range(at..at + marker.len(), &" ".repeat(marker.len()));
        }
    }
    Ok(index)
}

/// Turn the index link to `page` into non-clickable bold text carrying the
/// `i-<page>` id, marking the chapter being read.
#[must_use]
pub fn disable_article_link(index: &str, page: &str) -> String {
    let open = format!(r#"<a class="index" href="{page}">"#);
    let Some(start) = index.find(&open) else {
        return index.to_owned();
    };
    let rest = &index[start + open.len()..];
    let Some(len) = rest.find("</a>") else {
        return index.to_owned();
    };

    format!(
        r#"{}<b class="index" id="i-{page}">{}</b>{}"#,
        &index[..start],
        &rest[..len],
        &rest[len + "</a>".len()..]
    )
}

/// HTML pages in one directory: the chapters under `articles/`, or one
/// page group under `pages/`.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File names of every `.html` page, sorted.
    pub async fn list_pages(&self) -> Result<Vec<String>, ContentError> {
        let io = |source: std::io::Error| ContentError::Io { path: self.dir.clone(), source };
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io)?;
        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io)? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(".html") && entry.file_type().await.map_err(io)?.is_file() {
                pages.push(name.to_owned());
            }
        }
        pages.sort();
        Ok(pages)
    }

    /// Read and parse `file`. Names that would leave the articles directory
    /// are reported as not found.
    pub async fn load_article(&self, file: &str) -> Result<Article, ContentError> {
        if file.is_empty() || file.starts_with('.') || file.contains(['/', '\\']) {
            return Err(ContentError::NotFound(file.to_owned()));
        }

        let path = self.dir.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(parse_article(file, &raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ContentError::NotFound(file.to_owned())),
            Err(source) => Err(ContentError::Io { path, source }),
        }
    }

    /// Table of contents from [`INDEX_ARTICLE`].
    pub async fn load_index(&self) -> Result<String, ContentError> {
        let article = self.load_article(INDEX_ARTICLE).await?;
        extract_index(&article)
    }

    /// Table of contents for a page group. Groups without one render with
    /// an empty index.
    pub async fn load_group_index(&self) -> Result<String, ContentError> {
        match self.load_index().await {
            Ok(index) => Ok(index),
            Err(ContentError::NotFound(_) | ContentError::MissingMarker { .. }) => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    /// Every chapter in reading order, headed by the table of contents.
    ///
    /// Lines tagged `(to remove)` are dropped from the table of contents.
    /// Chapters that fail to load are logged and left out.
    pub async fn build_print_book(&self) -> Result<Vec<Article>, ContentError> {
        let mut index_article = self.load_article(INDEX_ARTICLE).await?;

        let content = &index_article.content;
        let start = content
            .find(INDEX_START)
            .ok_or_else(|| ContentError::MissingMarker { article: INDEX_ARTICLE.to_owned(), marker: INDEX_START })?
            + INDEX_START.len();
        let section = &content[start..];
        let section = section.find(INDEX_END).map_or(section, |end| &section[..end]);
        let printable = section
            .lines()
            .filter(|line| !line.contains(LINE_TO_REMOVE))
            .collect::<Vec<_>>()
            .join("\n");

        index_article.filename_without_ext = "101".to_owned();
        index_article.content = printable;

        let linked = linked_articles(&index_article.content);
        let mut articles = Vec::with_capacity(linked.len() + 1);
        articles.push(index_article);
        for file in linked {
            match self.load_article(&file).await {
                Ok(article) => articles.push(article),
                Err(err) => warn!(%file, error = %err, "skipping chapter in print book"),
            }
        }
        debug!(chapters = articles.len(), "print book assembled");
        Ok(articles)
    }
}

/// Targets of `<li><a class="index" href="...">` links, in order.
fn linked_articles(index: &str) -> Vec<String> {
    let mut files = Vec::new();
    let mut rest = index;
    while let Some(at) = rest.find(INDEX_LINK) {
        rest = &rest[at + INDEX_LINK.len()..];
        let Some(end) = rest.find(r#"">"#) else {
            break;
        };
        files.push(rest[..end].to_owned());
        rest = &rest[end..];
    }
    files
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
