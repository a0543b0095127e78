//! Browser DOM glue.
//!
//! Everything here is best-effort: a failed `web_sys` call is logged and
//! skipped, never surfaced to the page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlLinkElement, HtmlScriptElement, Window};

use crate::cookie::parse_cookie_theme;
use crate::href::{ANCHOR_SELECTOR, rewrite_href};
use crate::resolve::PREFERS_LIGHT_QUERY;
use crate::switcher::ThemeHost;
use crate::variant::Theme;
use crate::THEME_ATTRIBUTE;

fn log_failure(what: &str, err: &JsValue) {
    log::warn!("{what} failed: {err:?}");
}

/// Rewrite every matching anchor's href. Returns how many were changed.
pub fn rewrite_anchors(document: &Document) -> usize {
    let anchors = match document.query_selector_all(ANCHOR_SELECTOR) {
        Ok(list) => list,
        Err(err) => {
            log_failure("anchor query", &err);
            return 0;
        }
    };

    let mut rewritten = 0;
    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let Some(relative) = rewrite_href(&href) else {
            continue;
        };
        match anchor.set_attribute("href", relative) {
            Ok(()) => rewritten += 1,
            Err(err) => log_failure("href rewrite", &err),
        }
    }
    rewritten
}

/// The theme the server rendered the page with, from `<html data-theme>`.
pub fn page_theme(document: &Document) -> Option<Theme> {
    let raw = document.document_element()?.get_attribute(THEME_ATTRIBUTE)?;
    raw.parse().ok()
}

/// The theme stored in `document.cookie`, if any.
pub fn cookie_theme(document: &Document) -> Option<Theme> {
    let html = document.dyn_ref::<HtmlDocument>()?;
    match html.cookie() {
        Ok(cookies) => parse_cookie_theme(&cookies),
        Err(err) => {
            log_failure("cookie read", &err);
            None
        }
    }
}

/// Whether the OS color scheme asks for the light variant.
pub fn prefers_light(window: &Window) -> bool {
    match window.match_media(PREFERS_LIGHT_QUERY) {
        Ok(Some(query)) => query.matches(),
        Ok(None) => false,
        Err(err) => {
            log_failure("matchMedia", &err);
            false
        }
    }
}

/// [`ThemeHost`] backed by the live document.
pub struct DomHost {
    document: Document,
}

impl DomHost {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn remove(&self, id: &str) {
        if let Some(existing) = self.document.get_element_by_id(id) {
            existing.remove();
        }
    }

    fn append_to_head(&self, element: &Element) {
        let Some(head) = self.document.head() else {
            log::warn!("document has no <head>");
            return;
        };
        if let Err(err) = head.append_child(element) {
            log_failure("append to <head>", &err);
        }
    }

    fn create<T: JsCast>(&self, tag: &str) -> Option<T> {
        match self.document.create_element(tag) {
            Ok(element) => element.dyn_into::<T>().ok(),
            Err(err) => {
                log_failure("create element", &err);
                None
            }
        }
    }
}

impl ThemeHost for DomHost {
    fn load_stylesheet(&mut self, id: &str, href: &str) {
        self.remove(id);
        let Some(link) = self.create::<HtmlLinkElement>("link") else {
            return;
        };
        link.set_id(id);
        link.set_rel("stylesheet");
        link.set_type("text/css");
        link.set_href(href);
        link.set_media("all");
        self.append_to_head(&link);
    }

    fn load_script(&mut self, id: &str, href: &str) {
        self.remove(id);
        let Some(script) = self.create::<HtmlScriptElement>("script") else {
            return;
        };
        script.set_id(id);
        script.set_type("text/javascript");
        script.set_src(href);
        self.append_to_head(&script);
    }

    fn write_cookie(&mut self, cookie: &str) {
        let Some(html) = self.document.dyn_ref::<HtmlDocument>() else {
            log::warn!("document is not an HTML document; theme not persisted");
            return;
        };
        if let Err(err) = html.set_cookie(cookie) {
            log_failure("cookie write", &err);
        }
    }
}
