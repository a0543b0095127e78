//! `GET /article/{item}`: chapters, moved chapters and the print book.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::{error, info};

use super::{HOME, html_page, not_found_redirect};
use crate::content::ContentError;
use crate::render::{self, PrintTarget};
use crate::site;
use crate::state::AppState;

/// The only print book there is.
const PRINT_BOOK: &str = "book101";

pub async fn article(State(state): State<AppState>, Path(item): Path<String>) -> Response {
    serve(&state, &item).await
}

/// Chapter `item` of the book, whatever case it was requested in.
///
/// Pages carry only the configured theme. The reader's own choice lives in
/// the `theme` cookie and is applied by the client, so cached pages stay the
/// same for every reader.
pub(crate) async fn serve(state: &AppState, item: &str) -> Response {
    let item = item.to_ascii_lowercase();
    let is_local = state.is_local_server();

    if is_local {
        if let Some((target, name)) = PrintTarget::parse_item(&item) {
            return print_book(state, target, name).await;
        }
    }

    if let Some(page) = state.article_pages.get(&item) {
        return html_page(page, is_local);
    }

    let page = if let Some(target) = site::moved_to(&item) {
        site::redirect_page(target)
    } else {
        match site::article_page(&state.content, &state.index, &item, state.config.default_theme, is_local).await {
            Ok(page) => page,
            Err(ContentError::NotFound(_)) => {
                info!(article = %item, "article page not found");
                return not_found_redirect(HOME);
            }
            Err(err) => {
                error!(article = %item, error = %err, "article load failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
            }
        }
    };

    if !is_local {
        state.article_pages.set(item, page.clone());
    }
    html_page(page, is_local)
}

/// Print pages are only offered in local mode and never cached.
async fn print_book(state: &AppState, target: PrintTarget, name: &str) -> Response {
    if name != PRINT_BOOK {
        info!(book = %name, "print page not found");
        return not_found_redirect(HOME);
    }

    match state.content.build_print_book().await {
        Ok(articles) => {
            let page = Bytes::from(render::print_page(&articles, target).into_string());
            html_page(page, true)
        }
        Err(err) => {
            error!(book = %name, error = %err, "print book failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
