//! Page groups: `pages/<group>/*.html` served at `/<group>/<page>`, with
//! images under `/<group>/res/`.

use std::path::Path;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use tower_http::services::ServeDir;
use tracing::{error, info};

use super::{HOME, ONE_YEAR, html_page, not_found_redirect};
use crate::content::{ContentError, INDEX_ARTICLE};
use crate::site;
use crate::state::AppState;

pub(crate) async fn serve(state: &AppState, group: &str, dir: &Path, sub: &str, req: Request) -> Response {
    if sub.is_empty() {
        return Redirect::temporary(&format!("/{group}/{INDEX_ARTICLE}")).into_response();
    }
    if sub.starts_with("res/") {
        return resource(state, req).await;
    }

    let item = sub.to_ascii_lowercase();
    let is_local = state.is_local_server();
    let key = format!("{group}/{item}");
    if let Some(page) = state.article_pages.get(&key) {
        return html_page(page, is_local);
    }

    match site::group_page(dir, &item, state.config.default_theme, is_local).await {
        Ok(page) => {
            if !is_local {
                state.article_pages.set(key, page.clone());
            }
            html_page(page, is_local)
        }
        Err(ContentError::NotFound(_)) => {
            info!(%group, page = %item, "group page not found");
            not_found_redirect(HOME)
        }
        Err(err) => {
            error!(%group, page = %item, error = %err, "group page load failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Group images, looked up under `pages/` by the request path.
async fn resource(state: &AppState, req: Request) -> Response {
    match ServeDir::new(state.config.pages_dir()).try_call(req).await {
        Ok(response) => {
            let mut response = response.map(Body::new);
            if response.status().is_success() {
                response.headers_mut().insert(CACHE_CONTROL, HeaderValue::from_static(ONE_YEAR));
            }
            response
        }
        Err(err) => {
            error!(error = %err, "group resource failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
