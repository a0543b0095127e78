//! Document-ready sequence: rewrite links, apply the resolved theme, wire
//! the toggle control.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, HtmlElement};

use crate::THEME_SWITCH_ID;
use crate::dom::{self, DomHost};
use crate::resolve::resolve;
use crate::switcher::{SwitchOrigin, ThemeSwitcher};

/// Run [`on_ready`] now, or once `DOMContentLoaded` fires if the document is
/// still loading.
pub fn run_when_ready() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; theme client idle");
        return;
    };

    if document.ready_state() != "loading" {
        on_ready(&document);
        return;
    }

    let ready_document = document.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| on_ready(&ready_document));
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", handler.as_ref().unchecked_ref())
    {
        log::warn!("DOMContentLoaded listener failed: {err:?}");
    }
    // Lives for the page.
    handler.forget();
}

/// The whole client, in order.
pub fn on_ready(document: &Document) {
    let rewritten = dom::rewrite_anchors(document);
    log::debug!("rewrote {rewritten} book links");

    let page_theme = dom::page_theme(document);
    let cookie_theme = dom::cookie_theme(document);
    let prefers_light = web_sys::window().is_some_and(|w| dom::prefers_light(&w));
    let theme = resolve(page_theme, cookie_theme, prefers_light);
    log::debug!("theme resolved to {theme} (page {page_theme:?}, cookie {cookie_theme:?})");

    let mut host = DomHost::new(document.clone());
    let mut switcher = ThemeSwitcher::new(page_theme);
    switcher.switch(&mut host, theme, SwitchOrigin::Resolved);

    attach_toggle(document, Rc::new(RefCell::new((switcher, host))));
}

fn attach_toggle(document: &Document, state: Rc<RefCell<(ThemeSwitcher, DomHost)>>) {
    let Some(control) = document
        .get_element_by_id(THEME_SWITCH_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let style = control.style();
    if let Err(err) = style.set_property("cursor", "pointer") {
        log::debug!("toggle cursor style failed: {err:?}");
    }
    if let Err(err) = style.remove_property("color") {
        log::debug!("toggle color reset failed: {err:?}");
    }
    if let Err(err) = control.class_list().add_1("active") {
        log::debug!("toggle class failed: {err:?}");
    }

    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let mut guard = state.borrow_mut();
        let (switcher, host) = &mut *guard;
        let next = switcher.toggle(host);
        log::info!("theme switched to {next}");
    });
    if let Err(err) = control.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
        log::warn!("theme toggle listener failed: {err:?}");
    }
    handler.forget();
}
