// Browser tests for the DOM wiring. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gloo::timers::future::TimeoutFuture;
use heart_quest::puzzle::geometry::{CONTAINER_ID, OVERLAY_ID, UNLOCK_HEART_ID, UNLOCK_MESSAGE_ID};
use heart_quest::puzzle::overlay::{
    NAVIGATE_DELAY_MS, PULSE_CLASS, REVEAL_DELAY_MS, SHOW_CLASS, SHOW_DELAY_MS, VISIBLE_CLASS,
};
use heart_quest::puzzle::UNLOCK_AFTER_UPDATE_MS;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn active_index(selector: &str) -> usize {
    let list = document().query_selector_all(selector).unwrap();
    let mut active = Vec::new();
    for i in 0..list.length() {
        let el: web_sys::Element = list.item(i).unwrap().dyn_into().unwrap();
        if el.class_list().contains("active") {
            active.push(i as usize);
        }
    }
    assert_eq!(active.len(), 1, "exactly one active {selector}");
    active[0]
}

fn click(id: &str) {
    let el: web_sys::HtmlElement = document().get_element_by_id(id).unwrap().dyn_into().unwrap();
    el.click();
}

fn submit_blank(form_id: &str) -> web_sys::Event {
    let form = document().get_element_by_id(form_id).unwrap();
    let init = web_sys::EventInit::new();
    init.set_cancelable(true);
    let event = web_sys::Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&event).unwrap();
    event
}

#[wasm_bindgen_test]
fn carousel_buttons_and_dots_move_one_active_slide() {
    document().body().unwrap().set_inner_html(
        r#"<div class="carousel-container">
            <div class="slide"><img src="a.jpg"></div>
            <div class="slide"><img src="b.jpg"></div>
            <div class="slide"><img src="c.jpg"></div>
            <button id="prevBtn"></button><button id="nextBtn"></button>
            <div id="carouselDots"></div>
        </div>"#,
    );
    heart_quest::start_carousel(JsValue::UNDEFINED).unwrap();

    assert_eq!(count("#carouselDots .dot"), 3);
    assert_eq!(active_index(".slide"), 0);
    assert_eq!(active_index(".dot"), 0);

    click("nextBtn");
    assert_eq!(active_index(".slide"), 1);
    assert_eq!(active_index(".dot"), 1);

    click("prevBtn");
    click("prevBtn");
    assert_eq!(active_index(".slide"), 2, "prev wraps to the last slide");
    assert_eq!(active_index(".dot"), 2);

    let first_dot: web_sys::HtmlElement = document()
        .query_selector("#carouselDots .dot")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    first_dot.click();
    assert_eq!(active_index(".slide"), 0);
    assert_eq!(active_index(".dot"), 0);
}

#[wasm_bindgen_test]
fn hearts_fill_container_with_fifteen() {
    document()
        .body()
        .unwrap()
        .set_inner_html(r#"<div id="hearts-container"></div>"#);
    heart_quest::start_hearts().unwrap();

    assert_eq!(count("#hearts-container > div.heart"), heart_quest::hearts::HEART_COUNT as u32);
    let heart: web_sys::HtmlElement = document()
        .query_selector("#hearts-container > div.heart")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert!(heart.style().get_property_value("left").unwrap().ends_with("px"));
}

#[wasm_bindgen_test]
async fn repeated_full_heart_reports_build_one_overlay() {
    document()
        .body()
        .unwrap()
        .set_inner_html(&format!(r#"<div id="{CONTAINER_ID}"></div>"#));

    heart_quest::update_heart_progress(4).unwrap();
    heart_quest::update_heart_progress(4).unwrap();
    TimeoutFuture::new(UNLOCK_AFTER_UPDATE_MS + SHOW_DELAY_MS + 200).await;

    assert_eq!(count(&format!("#{OVERLAY_ID}")), 1);
    let doc = document();
    let overlay = doc.get_element_by_id(OVERLAY_ID).unwrap();
    assert!(overlay.class_list().contains(SHOW_CLASS));
    let container: web_sys::HtmlElement =
        doc.get_element_by_id(CONTAINER_ID).unwrap().dyn_into().unwrap();
    assert_eq!(container.style().get_property_value("display").unwrap(), "none");
    let message = doc.get_element_by_id(UNLOCK_MESSAGE_ID).unwrap();
    assert!(!message.class_list().contains(VISIBLE_CLASS));

    // A later report still schedules, but the page keeps its single overlay.
    heart_quest::update_heart_progress(4).unwrap();
    TimeoutFuture::new(UNLOCK_AFTER_UPDATE_MS + 200).await;
    assert_eq!(count(&format!("#{OVERLAY_ID}")), 1);

    click(OVERLAY_ID);
    assert!(doc.get_element_by_id(UNLOCK_HEART_ID).unwrap().class_list().contains(PULSE_CLASS));
    TimeoutFuture::new(REVEAL_DELAY_MS + 100).await;
    assert!(message.class_list().contains(VISIBLE_CLASS));

    // Navigation is dropped once the overlay is gone, which keeps the runner page.
    let href = web_sys::window().unwrap().location().href().unwrap();
    overlay.remove();
    TimeoutFuture::new(NAVIGATE_DELAY_MS + 200).await;
    assert_eq!(web_sys::window().unwrap().location().href().unwrap(), href);
}

#[wasm_bindgen_test]
fn puzzle_container_reflects_progress() {
    let win = web_sys::window().unwrap();
    let progress = js_sys::JSON::parse(
        r#"{"bitwisePuzzleCompleted":true,"base64PuzzleCompleted":true,"asciiPuzzleCompleted":false,"apiPuzzleCompleted":false}"#,
    )
    .unwrap();
    js_sys::Reflect::set(&win, &JsValue::from_str("questProgress"), &progress).unwrap();

    heart_quest::start_heart_puzzle().unwrap();

    let doc = document();
    let label = doc.get_element_by_id("heartProgressText").unwrap();
    assert_eq!(label.text_content().unwrap(), "2/4 pieces");
    let filled = doc.query_selector_all(".heart-piece-path.filled").unwrap();
    assert_eq!(filled.length(), 2);
}

#[wasm_bindgen_test]
fn blank_form_submission_is_cancelled_with_one_banner() {
    let doc = document();
    let body = doc.body().unwrap();
    body.set_inner_html(
        r#"<div><form id="asciiForm"><input id="answer" type="text" required></form></div>"#,
    );
    heart_quest::start_quest_forms().unwrap();

    let form: web_sys::HtmlFormElement = doc.get_element_by_id("asciiForm").unwrap().dyn_into().unwrap();
    for _ in 0..2 {
        let init = web_sys::EventInit::new();
        init.set_cancelable(true);
        let event = web_sys::Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&event).unwrap();
        assert!(event.default_prevented());
    }
    assert_eq!(doc.query_selector_all(".client-error").unwrap().length(), 1);

    let input: web_sys::HtmlElement = doc.get_element_by_id("answer").unwrap().dyn_into().unwrap();
    assert_eq!(input.style().get_property_value("border-color").unwrap(), "rgb(211, 47, 47)");
    input.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();
    assert_eq!(input.style().get_property_value("border-color").unwrap(), "");
}

#[wasm_bindgen_test]
async fn error_banner_goes_away_after_three_seconds() {
    document().body().unwrap().set_inner_html(
        r#"<div><form id="base64Form"><input id="answer" type="text" required></form></div>"#,
    );
    heart_quest::start_quest_forms().unwrap();

    assert!(submit_blank("base64Form").default_prevented());
    assert_eq!(count(".client-error"), 1);

    TimeoutFuture::new(heart_quest::quest_form::BANNER_MS + 200).await;
    assert_eq!(count(".client-error"), 0);
}

#[wasm_bindgen_test]
fn untracked_form_is_left_alone() {
    document().body().unwrap().set_inner_html(
        r#"<div><form id="search"><input type="text" required></form></div>"#,
    );
    heart_quest::start_quest_forms().unwrap();

    assert!(!submit_blank("search").default_prevented());
    assert_eq!(count(".client-error"), 0);
}
