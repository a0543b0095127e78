//! HTML pages.
//!
//! Chapter bodies and the table of contents are trusted HTML from the book
//! repository and go in unescaped; everything else is escaped by maud.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use theme::{AssetKind, THEME_SWITCH_ID, Theme, assets_for};

use crate::content::Article;
use crate::goget::GoGetPage;

/// ES module emitted by `wasm-bindgen --target web` for the theme client.
pub const THEME_CLIENT_MODULE: &str = "/static/theme/theme.js";

/// Print book flavors, from `/article/print-...` and `/article/pdf-...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintTarget {
    Print,
    Pdf,
}

impl PrintTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Pdf => "pdf",
        }
    }

    /// Split `print-book101` into the target and the book name.
    #[must_use]
    pub fn parse_item(item: &str) -> Option<(Self, &str)> {
        if let Some(name) = item.strip_prefix("print-") {
            Some((Self::Print, name))
        } else {
            item.strip_prefix("pdf-").map(|name| (Self::Pdf, name))
        }
    }
}

/// `<head>` links for `theme`, with the ids the theme client swaps.
fn theme_assets(theme: Theme) -> Markup {
    html! {
        @for asset in assets_for(theme) {
            @match asset.kind {
                AssetKind::Stylesheet => {
                    link id=(asset.id) rel="stylesheet" type="text/css" href=(asset.href) media="all";
                },
                AssetKind::Script => {
                    script id=(asset.id) type="text/javascript" src=(asset.href) {}
                },
            }
        }
    }
}

fn theme_client() -> Markup {
    let loader = format!(r#"import init from "{THEME_CLIENT_MODULE}"; init();"#);
    html! {
        script type="module" { (PreEscaped(loader)) }
    }
}

/// A chapter page.
///
/// `theme` is the theme the page is rendered with. When unset the head
/// carries the fallback assets and the client picks the final theme.
#[must_use]
pub fn article_page(article: &Article, index: &str, theme: Option<Theme>, is_local: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=[theme.map(Theme::as_str)] {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (article.title_without_tags) " - Go 101" }
                (theme_assets(theme.unwrap_or_default()))
            }
            body {
                nav class="book-nav" {
                    a href="/article/101.html" { "Go 101" }
                    span id=(THEME_SWITCH_ID) class="theme-switch" title="Switch theme" { "◐" }
                    @if is_local {
                        a class="print-link" href="/article/print-book101" { "Print" }
                    }
                }
                aside class="book-index" { (PreEscaped(index)) }
                main class="article" id=(article.filename_without_ext) {
                    (PreEscaped(&article.title))
                    (PreEscaped(&article.content))
                }
                (theme_client())
            }
        }
    }
}

/// Every chapter on one page, for printing or PDF export.
#[must_use]
pub fn print_page(articles: &[Article], target: PrintTarget) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Go 101" }
                (theme_assets(Theme::Light))
            }
            body class={ "print-target-" (target.as_str()) } {
                @for article in articles {
                    section class="print-article" id={ "article-" (article.filename_without_ext) } {
                        (PreEscaped(&article.title))
                        (PreEscaped(&article.content))
                    }
                }
            }
        }
    }
}

/// Meta refresh to a chapter's new location.
#[must_use]
pub fn redirect_page(target: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { "Moved" }
            }
            body {
                p { "This page has moved to " a href=(target) { (target) } "." }
            }
        }
    }
}

/// Vanity import page read by `go get` and followed by browsers.
#[must_use]
pub fn goget_page(page: &GoGetPage) -> Markup {
    let import = format!("{} git {}", page.import_prefix, page.repo_url);
    let source = format!(
        "{prefix} {repo} {repo}/tree/master{{/dir}} {repo}/blob/master{{/dir}}/{{file}}#L{{line}}",
        prefix = page.import_prefix,
        repo = page.repo_url,
    );
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="go-import" content=(import);
                meta name="go-source" content=(source);
                meta http-equiv="refresh" content={ "0; url=" (page.doc_url) };
                title { (page.import_prefix) }
            }
            body {
                p { "Redirecting to " a href=(page.doc_url) { (page.doc_url) } "." }
            }
        }
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
