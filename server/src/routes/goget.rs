//! Top-level names that are neither chapters nor page groups: go-get vanity
//! imports, else website pages.

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tower_http::services::ServeFile;
use tracing::{debug, error};

use super::{html_page, not_found_redirect};
use crate::goget::split_version;
use crate::render;
use crate::state::AppState;

/// `pkg` is already lowercased.
pub(crate) async fn serve(state: &AppState, pkg: &str, sub: &str, req: Request) -> Response {
    let request = split_version(pkg, sub);
    let is_local = state.is_local_server();

    let Some(info) = state.config.packages.get(&request.root) else {
        if request.sub.is_empty() {
            return website_page(state, pkg, req).await;
        }
        debug!(package = %request.root, sub = %request.sub, "unknown go-get package");
        return not_found_redirect("/");
    };

    let key = request.cache_key();
    if let Some(page) = state.goget_pages.get(&key) {
        return html_page(page, is_local);
    }

    let page = info.page(&request.sub, &request.version);
    let page = Bytes::from(render::goget_page(&page).into_string());
    if !is_local {
        state.goget_pages.set(key, page.clone());
    }
    html_page(page, is_local)
}

/// `website/<name>`.
async fn website_page(state: &AppState, name: &str, req: Request) -> Response {
    let Some(path) = state.config.website_file(name) else {
        return not_found_redirect("/");
    };
    match ServeFile::new(path).try_call(req).await {
        Ok(response) => response.map(Body::new),
        Err(err) => {
            error!(error = %err, "website page failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
