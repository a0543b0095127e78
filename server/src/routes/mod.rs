//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the whole site: chapter pages under `/article`,
//! static assets and chapter images with year-long caching, page groups
//! under `/<group>/`, and every other top-level path as a potential go-get
//! vanity import. The first path segment is matched without regard to case.
//! A middleware records whether each request came in through `localhost`,
//! which switches the server between fresh and cached rendering.

pub mod article;
pub mod goget;
pub mod group;

use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, HOST, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use bytes::Bytes;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, is_local_host, page_cache_control};

pub const HOME: &str = "/article/101.html";
pub(crate) const ONE_YEAR: &str = "max-age=31536000";
const ARTICLE_GROUP: &str = "article";

/// Full site router.
pub fn app(state: AppState) -> Router {
    let assets = Router::new()
        .nest_service("/static", ServeDir::new(state.config.static_dir()))
        .nest_service("/article/res", ServeDir::new(state.config.article_res_dir()))
        .layer(SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static(ONE_YEAR)));

    Router::new()
        .route("/", get(redirect_home))
        .route("/healthz", get(healthz))
        .route("/article/{item}", get(article::article))
        .route("/{first}", get(top_level))
        .route("/{first}/{*rest}", get(top_level_nested))
        .merge(assets)
        .layer(middleware::from_fn_with_state(state.clone(), track_local_server))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Switch server mode from the request's `Host` header.
async fn track_local_server(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let is_local = req
        .headers()
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .is_some_and(is_local_host);
    state.confirm_local_server(is_local);
    next.run(req).await
}

/// `GET /{first}`
async fn top_level(State(state): State<AppState>, Path(first): Path<String>, req: Request) -> Response {
    dispatch(&state, &first, "", req).await
}

/// `GET /{first}/{*rest}`
async fn top_level_nested(
    State(state): State<AppState>,
    Path((first, rest)): Path<(String, String)>,
    req: Request,
) -> Response {
    dispatch(&state, &first, &rest, req).await
}

/// Route on the lowercased first segment: the chapter group, a page group
/// directory, else go-get and website pages.
async fn dispatch(state: &AppState, first: &str, rest: &str, req: Request) -> Response {
    let first = first.to_ascii_lowercase();
    if first == ARTICLE_GROUP {
        return article::serve(state, rest).await;
    }
    if let Some(dir) = state.config.group_dir(&first) {
        if tokio::fs::metadata(&dir).await.is_ok_and(|meta| meta.is_dir()) {
            return group::serve(state, &first, &dir, rest, req).await;
        }
    }
    goget::serve(state, &first, rest, req).await
}

async fn redirect_home() -> Redirect {
    Redirect::temporary(HOME)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// A rendered HTML page with the cache policy of the current mode.
pub(crate) fn html_page(page: Bytes, is_local: bool) -> Response {
    (
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8")),
            (CACHE_CONTROL, page_cache_control(is_local)),
        ],
        page,
    )
        .into_response()
}

/// `404` pointing the client back at `location`.
pub(crate) fn not_found_redirect(location: &'static str) -> Response {
    (StatusCode::NOT_FOUND, [(LOCATION, HeaderValue::from_static(location))]).into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
