// Browser side of the heart puzzle: progress container, piece animations and
// the unlock overlay.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use super::geometry::{
    CONTAINER_ID, FILLED_CLASS, FILLING_CLASS, OVERLAY_ID, PROGRESS_TEXT_ID, UNLOCK_HEART_ID,
    UNLOCK_MESSAGE_ID, piece_selector, unlock_overlay_markup,
};
use super::overlay::{OverlayEffect, PULSE_CLASS, SHOW_CLASS, SHOW_DELAY_MS, VISIBLE_CLASS};
use super::{FILL_ANIMATION_MS, HIGHLIGHT_DELAY_MS, HeartPuzzle, QuestProgress, UnlockOverlay};
use crate::dom;

const PROGRESS_GLOBAL: &str = "questProgress";

thread_local! {
    static PUZZLE: RefCell<Option<HeartPuzzle>> = const { RefCell::new(None) };
}

/// Read the page's `questProgress` object. `None` when the page did not define it.
fn read_progress() -> Result<Option<QuestProgress>, JsValue> {
    let win = dom::window()?;
    let value = js_sys::Reflect::get(&win, &JsValue::from_str(PROGRESS_GLOBAL))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let json: String = js_sys::JSON::stringify(&value)?.into();
    QuestProgress::from_json(&json)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("bad {PROGRESS_GLOBAL}: {e}")))
}

fn piece(doc: &web_sys::Document, idx: usize) -> Option<Element> {
    doc.query_selector(&piece_selector(idx)).ok().flatten()
}

/// Build the puzzle from the page snapshot. Does nothing if `questProgress` is absent.
pub fn mount() -> Result<(), JsValue> {
    let Some(progress) = read_progress()? else {
        return Ok(());
    };
    let doc = dom::document()?;

    let mut puzzle = HeartPuzzle::new();
    let init = puzzle.initialize(&progress);
    PUZZLE.with(|p| p.replace(Some(puzzle)));

    let container = doc.create_element("div")?;
    container.set_class_name("heart-puzzle-container");
    container.set_id(CONTAINER_ID);
    container.set_inner_html(&init.markup);
    dom::body()?.append_child(&container)?;
    gloo::console::log!("heart puzzle", init.filled as u32, "of 4 pieces");

    if let Some(idx) = init.highlight {
        dom::after(HIGHLIGHT_DELAY_MS, move || {
            let Ok(doc) = dom::document() else { return };
            let Some(last) = piece(&doc, idx) else { return };
            if last.class_list().contains(FILLED_CLASS) {
                last.class_list().add_1(FILLING_CLASS).ok();
                dom::after(FILL_ANIMATION_MS, move || {
                    last.class_list().remove_1(FILLING_CLASS).ok();
                });
            }
        });
    }
    if let Some(ms) = init.unlock_after_ms {
        dom::after(ms, report(show_unlock_overlay));
    }
    Ok(())
}

/// Apply a progress change that happened without a page reload.
pub fn update_progress(count: u32) -> Result<(), JsValue> {
    let update = PUZZLE.with(|p| {
        p.borrow_mut()
            .get_or_insert_with(HeartPuzzle::new)
            .update_progress(count)
    });
    let update = match update {
        Ok(u) => u,
        Err(err) => {
            gloo::console::warn!("ignored heart progress update:", err.to_string());
            return Err(JsValue::from_str(&err.to_string()));
        }
    };
    let doc = dom::document()?;

    if let Some(idx) = update.fill_piece {
        if let Some(el) = piece(&doc, idx) {
            if !el.class_list().contains(FILLED_CLASS) {
                el.class_list().add_1(FILLING_CLASS)?;
                dom::after(FILL_ANIMATION_MS, move || {
                    el.class_list().remove_1(FILLING_CLASS).ok();
                    el.class_list().add_1(FILLED_CLASS).ok();
                });
            }
        }
    }
    if let Some(text) = doc.get_element_by_id(PROGRESS_TEXT_ID) {
        text.set_text_content(Some(&update.label));
    }
    if let Some(ms) = update.unlock_after_ms {
        dom::after(ms, report(show_unlock_overlay));
    }
    Ok(())
}

fn report(f: fn() -> Result<(), JsValue>) -> impl FnOnce() + 'static {
    move || {
        if let Err(err) = f() {
            gloo::console::error!("heart unlock failed", err);
        }
    }
}

fn show_unlock_overlay() -> Result<(), JsValue> {
    let doc = dom::document()?;
    if doc.get_element_by_id(OVERLAY_ID).is_some() {
        return Ok(());
    }
    if let Some(container) = doc.get_element_by_id(CONTAINER_ID) {
        if let Ok(container) = container.dyn_into::<HtmlElement>() {
            dom::set_style(&container, "display", "none");
        }
    }

    let overlay: HtmlElement = doc.create_element("div")?.dyn_into()?;
    overlay.set_class_name("heart-unlock-overlay");
    overlay.set_id(OVERLAY_ID);
    overlay.set_inner_html(&unlock_overlay_markup());
    dom::body()?.append_child(&overlay)?;
    // Force layout so the `show` transition animates from the hidden state.
    let _ = overlay.offset_height();

    {
        let overlay = overlay.clone();
        dom::after(SHOW_DELAY_MS, move || {
            overlay.class_list().add_1(SHOW_CLASS).ok();
        });
    }

    let machine = Rc::new(RefCell::new(UnlockOverlay::new()));
    let on_click = machine.clone();
    EventListener::new(&overlay, "click", move |_| {
        let effects = on_click.borrow_mut().click();
        run_effects(&on_click, effects);
    })
    .forget();
    Ok(())
}

fn run_effects(machine: &Rc<RefCell<UnlockOverlay>>, effects: Vec<OverlayEffect>) {
    let Ok(doc) = dom::document() else { return };
    for effect in effects {
        match effect {
            OverlayEffect::PulseHeart => {
                if let Some(heart) = doc.get_element_by_id(UNLOCK_HEART_ID) {
                    heart.class_list().add_1(PULSE_CLASS).ok();
                }
            }
            OverlayEffect::RevealMessage => {
                if let Some(message) = doc.get_element_by_id(UNLOCK_MESSAGE_ID) {
                    message.class_list().add_1(VISIBLE_CLASS).ok();
                }
            }
            OverlayEffect::After { ms, step } => {
                let machine = machine.clone();
                dom::after(ms, move || {
                    let next = machine.borrow_mut().step(step);
                    run_effects(&machine, next);
                });
            }
            OverlayEffect::Navigate(path) => {
                // A detached overlay no longer owns the page.
                if doc.get_element_by_id(OVERLAY_ID).is_none() {
                    continue;
                }
                if let Ok(win) = dom::window() {
                    if let Err(err) = win.location().set_href(path) {
                        gloo::console::error!("navigation failed", err);
                    }
                }
            }
        }
    }
}
