//! Static site generation.
//!
//! Writes every page the server would render in public mode, plus every
//! file it would serve, under one output directory laid out like the URL
//! space: `index.html`, `article/*`, `static/*`, `<group>/*` and the website
//! pages at the top. The output can be served by any static file host.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::content::{ContentError, ContentStore, INDEX_ARTICLE};
use crate::site;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0} not found; is the root a book checkout?")]
    NotABook(PathBuf),
    #[error("refusing to replace {0}: it holds the book itself")]
    OutputHoldsBook(PathBuf),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> GenerateError {
    let path = path.to_owned();
    move |source| GenerateError::Io { action, path, source }
}

/// What a generation run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Rendered HTML pages.
    pub pages: usize,
    /// Files copied as they are.
    pub files: usize,
}

/// Generate the site for `config` into `out`, replacing whatever is there.
pub async fn generate_site(config: &ServerConfig, out: &Path) -> Result<GenerateReport, GenerateError> {
    let static_dir = config.static_dir();
    if !is_dir(&static_dir).await {
        return Err(GenerateError::NotABook(static_dir));
    }

    if let (Ok(root), Ok(target)) = (tokio::fs::canonicalize(&config.root).await, tokio::fs::canonicalize(out).await) {
        if root.starts_with(&target) {
            return Err(GenerateError::OutputHoldsBook(out.to_owned()));
        }
    }

    match tokio::fs::remove_dir_all(out).await {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => return Err(io_error("remove", out)(err)),
        _ => {}
    }
    tokio::fs::create_dir_all(out).await.map_err(io_error("create", out))?;

    let mut report = GenerateReport::default();
    let theme = config.default_theme;

    let chapters = ContentStore::new(config.articles_dir());
    let index = chapters.load_index().await?;
    let article_out = out.join("article");
    for file in chapters.list_pages().await? {
        let page = site::article_page(&chapters, &index, &file, theme, false).await?;
        if file == INDEX_ARTICLE {
            write_file(&out.join("index.html"), &page).await?;
            report.pages += 1;
        }
        write_file(&article_out.join(&file), &page).await?;
        report.pages += 1;
    }
    for (from, to) in site::MOVED_ARTICLES {
        write_file(&article_out.join(from), &site::redirect_page(to)).await?;
        report.pages += 1;
    }

    report.files += copy_tree(&static_dir, &out.join("static")).await?;
    report.files += copy_tree(&config.article_res_dir(), &article_out.join("res")).await?;

    for group in subdirectories(&config.pages_dir()).await? {
        let dir = config.pages_dir().join(&group);
        let group_out = out.join(&group);
        for file in ContentStore::new(&dir).list_pages().await? {
            let page = site::group_page(&dir, &file, theme, false).await?;
            write_file(&group_out.join(&file), &page).await?;
            report.pages += 1;
        }
        report.files += copy_tree(&dir.join("res"), &group_out.join("res")).await?;
    }

    report.files += copy_tree(&config.website_dir(), out).await?;

    info!(out = %out.display(), pages = report.pages, files = report.files, "site generated");
    Ok(report)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error("create", parent))?;
    }
    tokio::fs::write(path, data).await.map_err(io_error("write", path))?;
    debug!(path = %path.display(), size = data.len(), "generated");
    Ok(())
}

/// Names of the directories directly under `dir`, sorted. A missing `dir`
/// has none.
async fn subdirectories(dir: &Path) -> Result<Vec<String>, GenerateError> {
    if !is_dir(dir).await {
        return Ok(Vec::new());
    }
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error("read", dir))?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error("read", dir))? {
        let is_dir = entry.file_type().await.map_err(io_error("read", dir))?.is_dir();
        if let (true, Some(name)) = (is_dir, entry.file_name().to_str()) {
            names.push(name.to_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Copy every file under `from` to the same relative path under `to`.
/// A missing `from` copies nothing. Returns the number of files copied.
async fn copy_tree(from: &Path, to: &Path) -> Result<usize, GenerateError> {
    if !is_dir(from).await {
        return Ok(0);
    }

    let mut copied = 0;
    let mut pending = vec![(from.to_owned(), to.to_owned())];
    while let Some((src_dir, dst_dir)) = pending.pop() {
        tokio::fs::create_dir_all(&dst_dir).await.map_err(io_error("create", &dst_dir))?;
        let mut entries = tokio::fs::read_dir(&src_dir).await.map_err(io_error("read", &src_dir))?;
        while let Some(entry) = entries.next_entry().await.map_err(io_error("read", &src_dir))? {
            let src = entry.path();
            let dst = dst_dir.join(entry.file_name());
            let file_type = entry.file_type().await.map_err(io_error("read", &src))?;
            if file_type.is_dir() {
                pending.push((src, dst));
            } else if file_type.is_file() {
                tokio::fs::copy(&src, &dst).await.map_err(io_error("copy", &src))?;
                copied += 1;
            }
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
