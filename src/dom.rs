//! Small browser helpers shared by the component bindings.
//!
//! Missing window / document / body are reported as `JsValue` errors so the
//! exported entry points can propagate them with `?`.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))
}

/// Look up a required element by id.
pub fn require_id(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

/// Collect every element matching `selector` under `root`.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    collect(root.query_selector_all(selector)?)
}

/// Document-wide variant of [`query_all`].
pub fn query_all_doc(doc: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    collect(doc.query_selector_all(selector)?)
}

fn collect(list: web_sys::NodeList) -> Result<Vec<Element>, JsValue> {
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.item(i) {
            out.push(node.dyn_into::<Element>()?);
        }
    }
    Ok(out)
}

/// Run `f` once the DOM is parsed. If the module loads after
/// `DOMContentLoaded` already fired, `f` runs immediately.
pub fn on_ready<F>(f: F) -> Result<(), JsValue>
where
    F: FnOnce() -> Result<(), JsValue> + 'static,
{
    let doc = document()?;
    if doc.ready_state() != "loading" {
        return f();
    }
    EventListener::once(&doc, "DOMContentLoaded", move |_| {
        if let Err(err) = f() {
            gloo::console::error!("ready handler failed", err);
        }
    })
    .forget();
    Ok(())
}

/// Fire-and-forget timeout. Page unload is the only cancellation.
pub fn after<F>(ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    Timeout::new(ms, f).forget();
}

/// Set an inline style property, ignoring failures on read-only styles.
pub fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    el.style().set_property(prop, value).ok();
}
