use super::*;
use axum::body::Body;
use axum::http::header::{COOKIE, LOCATION};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::state::test_helpers;

const PUBLIC_HOST: &str = "go101.org";
const LOCAL_HOST: &str = "localhost:55555";

async fn get_from(app: Router, host: &str, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = axum::http::Request::builder().uri(uri).header(HOST, host);
    if let Some(cookie) = cookie {
        req = req.header(COOKIE, cookie);
    }
    app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body_text(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header<'a>(res: &'a Response, name: axum::http::HeaderName) -> &'a str {
    res.headers().get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

#[tokio::test]
async fn root_redirects_to_contents() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/", None).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header(&res, LOCATION), HOME);
}

#[tokio::test]
async fn healthz_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    assert_eq!(get_from(app, PUBLIC_HOST, "/healthz", None).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn article_renders_with_public_cache_policy() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/article/channel.html", None).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, CACHE_CONTROL), "max-age=50000");
    assert!(header(&res, CONTENT_TYPE).starts_with("text/html"));
    let body = body_text(res).await;
    assert!(body.contains("<h1>Channels</h1>"));
    assert!(body.contains(r#"<b class="index" id="i-channel.html">Channels</b>"#));
    assert!(body.contains(r#"<a class="index" href="101.html">"#));
}

#[tokio::test]
async fn article_item_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/article/Channel.HTML", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_article_is_404_pointing_home() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/article/nope.html", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(header(&res, LOCATION), HOME);
}

#[tokio::test]
async fn theme_cookie_leaves_cached_page_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state.clone());

    let dark = get_from(app.clone(), PUBLIC_HOST, "/article/channel.html", Some("theme=dark")).await;
    assert_eq!(header(&dark, CACHE_CONTROL), "max-age=50000");
    let dark = body_text(dark).await;
    let light = body_text(get_from(app, PUBLIC_HOST, "/article/channel.html", Some("theme=light")).await).await;

    // The reader's choice is applied client-side; a shared page must not pin it.
    assert!(!dark.contains("data-theme"));
    assert_eq!(dark, light);
    assert_eq!(state.article_pages.len(), 1);
}

#[tokio::test]
async fn configured_theme_is_the_page_theme() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::with_root(dir.path());
    config.default_theme = Some(theme::Theme::Light);
    let app = app(test_helpers::test_app_state_with(config));

    let body = body_text(get_from(app, PUBLIC_HOST, "/article/channel.html", Some("theme=dark")).await).await;
    assert!(body.contains(r#"data-theme="light""#));
    assert!(body.contains("v993-light.css"));
}

#[tokio::test]
async fn pages_are_cached_in_public_mode() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state.clone());

    get_from(app.clone(), PUBLIC_HOST, "/article/channel.html", None).await;
    assert_eq!(state.article_pages.len(), 1);

    // Cached copy is served even after the source changes.
    std::fs::write(dir.path().join("articles").join("channel.html"), "<h1>Changed</h1>").unwrap();
    let body = body_text(get_from(app, PUBLIC_HOST, "/article/channel.html", None).await).await;
    assert!(body.contains("<h1>Channels</h1>"));
}

#[tokio::test]
async fn localhost_requests_render_fresh_and_uncached() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state.clone());

    get_from(app.clone(), PUBLIC_HOST, "/article/channel.html", None).await;
    assert_eq!(state.article_pages.len(), 1);

    std::fs::write(dir.path().join("articles").join("channel.html"), "<h1>Changed</h1>").unwrap();
    let res = get_from(app, LOCAL_HOST, "/article/channel.html", None).await;
    assert_eq!(header(&res, CACHE_CONTROL), "no-cache, private, max-age=0");
    assert!(body_text(res).await.contains("<h1>Changed</h1>"));
    assert!(state.is_local_server());
    assert!(state.article_pages.is_empty());
}

#[tokio::test]
async fn moved_article_gets_redirect_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/article/go-sdk.html", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("url=/article/go-toolchain.html"));
}

#[tokio::test]
async fn print_book_only_in_local_mode() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state);

    let public = get_from(app.clone(), PUBLIC_HOST, "/article/print-book101", None).await;
    assert_eq!(public.status(), StatusCode::NOT_FOUND);

    let local = get_from(app.clone(), LOCAL_HOST, "/article/print-book101", None).await;
    assert_eq!(local.status(), StatusCode::OK);
    let body = body_text(local).await;
    assert!(body.contains("print-target-print"));
    assert!(body.contains(r#"id="article-channel""#));

    let unknown = get_from(app, LOCAL_HOST, "/article/pdf-book202", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_files_are_cached_for_a_year() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/static/go101/css/v993-dark.css", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, CACHE_CONTROL), ONE_YEAR);
    assert_eq!(body_text(res).await, "body{}");
}

#[tokio::test]
async fn article_images_are_cached_for_a_year() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/article/res/pic.png", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, CACHE_CONTROL), ONE_YEAR);
}

#[tokio::test]
async fn goget_page_for_known_package() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state.clone());
    let res = get_from(app, PUBLIC_HOST, "/golds?go-get=1", None).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains(r#"content="go101.org/golds git https://github.com/go101/golds""#));
    assert_eq!(state.goget_pages.len(), 1);
}

#[tokio::test]
async fn goget_sub_package_with_version() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/golds/gold@v0.6.0", None).await;
    let body = body_text(res).await;
    assert!(body.contains("url=https://pkg.go.dev/go101.org/golds/gold@v0.6.0"));
}

#[tokio::test]
async fn unknown_package_with_sub_path_is_404_pointing_root() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/nosuch/thing", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(header(&res, LOCATION), "/");
}

#[tokio::test]
async fn unknown_top_level_name_serves_website_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));

    let res = get_from(app.clone(), PUBLIC_HOST, "/about.html", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "<p>about</p>");

    let missing = get_from(app, PUBLIC_HOST, "/nothing.html", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn first_segment_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));

    let res = get_from(app.clone(), PUBLIC_HOST, "/Article/Channel.html", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("<h1>Channels</h1>"));

    let res = get_from(app, PUBLIC_HOST, "/About.HTML", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "<p>about</p>");
}

#[tokio::test]
async fn moved_article_target_in_page_group_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));

    let moved = body_text(get_from(app.clone(), PUBLIC_HOST, "/article/tool-golds.html", None).await).await;
    assert!(moved.contains("url=/apps-and-libs/golds.html"));

    let res = get_from(app, PUBLIC_HOST, "/apps-and-libs/golds.html", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, CACHE_CONTROL), "max-age=50000");
    let body = body_text(res).await;
    assert!(body.contains("<h1>Golds</h1>"));
    assert!(body.contains(r#"<b class="index" id="i-golds.html">Golds</b>"#));
}

#[tokio::test]
async fn every_moved_article_lands_on_a_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    std::fs::write(dir.path().join("articles").join("go-toolchain.html"), "<h1>Toolchain</h1>").unwrap();

    for (_, target) in crate::site::MOVED_ARTICLES {
        let res = get_from(app.clone(), PUBLIC_HOST, target, None).await;
        assert_eq!(res.status(), StatusCode::OK, "{target}");
    }
}

#[tokio::test]
async fn page_group_pages_are_cached_per_group() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path());
    let app = app(state.clone());
    get_from(app, PUBLIC_HOST, "/apps-and-libs/golds.html", None).await;
    assert!(state.article_pages.get("apps-and-libs/golds.html").is_some());
}

#[tokio::test]
async fn page_group_root_redirects_to_its_index() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/apps-and-libs", None).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header(&res, LOCATION), "/apps-and-libs/101.html");
}

#[tokio::test]
async fn missing_group_page_is_404_pointing_home() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/apps-and-libs/nope.html", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(header(&res, LOCATION), HOME);
}

#[tokio::test]
async fn page_group_images_are_cached_for_a_year() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_helpers::test_app_state(dir.path()));
    let res = get_from(app, PUBLIC_HOST, "/apps-and-libs/res/golds.png", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header(&res, CACHE_CONTROL), ONE_YEAR);
}
