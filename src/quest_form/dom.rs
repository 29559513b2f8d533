use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent};

use super::{
    ANSWER_INPUT_SELECTOR, BANNER_ANIMATION, BANNER_CLASSES, BANNER_MS, BANNER_SELECTOR,
    BANNER_TEXT, BORDER_RESET_MS, ERROR_BORDER_COLOR, FormVerdict, REQUIRED_INPUTS_SELECTOR,
    TYPED_INPUTS_SELECTOR, check_required, is_tracked_form, submits_on_enter,
};
use crate::dom;

fn inputs(form: &Element, selector: &str) -> Result<Vec<HtmlInputElement>, JsValue> {
    Ok(dom::query_all(form, selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect())
}

fn clear_border(input: &HtmlInputElement) {
    dom::set_style(input, "border-color", "");
}

/// Replace any previous banner with a fresh one above the first form.
fn show_error(message: &str) -> Result<(), JsValue> {
    let doc = dom::document()?;
    if let Some(existing) = doc.query_selector(BANNER_SELECTOR)? {
        existing.remove();
    }
    let Some(form) = doc.query_selector("form")? else {
        return Ok(());
    };
    let Some(parent) = form.parent_node() else {
        return Ok(());
    };
    let banner: HtmlElement = doc.create_element("div")?.dyn_into()?;
    banner.set_class_name(BANNER_CLASSES);
    banner.set_text_content(Some(message));
    dom::set_style(&banner, "animation", BANNER_ANIMATION);
    let anchor: &web_sys::Node = &form;
    parent.insert_before(&banner, Some(anchor))?;
    dom::after(BANNER_MS, move || banner.remove());
    Ok(())
}

fn on_submit(form: &Element, event: &web_sys::Event) -> Result<(), JsValue> {
    let required = inputs(form, REQUIRED_INPUTS_SELECTOR)?;
    let values: Vec<String> = required.iter().map(|i| i.value()).collect();
    let FormVerdict::Blank(blank) = check_required(&values) else {
        return Ok(());
    };
    for idx in blank {
        let input = required[idx].clone();
        dom::set_style(&input, "border-color", ERROR_BORDER_COLOR);
        dom::after(BORDER_RESET_MS, move || clear_border(&input));
    }
    event.prevent_default();
    show_error(BANNER_TEXT)
}

fn wire_form(form: &Element) -> Result<(), JsValue> {
    {
        let target = form.clone();
        // Non-passive so the blank-field check can cancel the submission.
        EventListener::new_with_options(
            form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Err(err) = on_submit(&target, event) {
                    gloo::console::error!("form check failed", err);
                }
            },
        )
        .forget();
    }
    for input in inputs(form, TYPED_INPUTS_SELECTOR)? {
        let typed = input.clone();
        EventListener::new(&input, "input", move |_| clear_border(&typed)).forget();
    }
    Ok(())
}

// Enter in the answer field submits directly; `submit()` skips the submit event.
fn wire_enter_submit(form: &Element) -> Result<(), JsValue> {
    let Some(answer) = form.query_selector(ANSWER_INPUT_SELECTOR)? else {
        return Ok(());
    };
    let form: HtmlFormElement = form.clone().dyn_into()?;
    EventListener::new_with_options(
        &answer,
        "keypress",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key_event.key() == "Enter" {
                event.prevent_default();
                if let Err(err) = form.submit() {
                    gloo::console::error!("form submit failed", err);
                }
            }
        },
    )
    .forget();
    Ok(())
}

/// Attach validation to every tracked form once the document is ready.
pub fn mount() -> Result<(), JsValue> {
    dom::on_ready(|| {
        let doc = dom::document()?;
        for form in dom::query_all_doc(&doc, "form")? {
            let id = form.id();
            if !is_tracked_form(&id) {
                continue;
            }
            wire_form(&form)?;
            if submits_on_enter(&id) {
                wire_enter_submit(&form)?;
            }
        }
        Ok(())
    })
}
