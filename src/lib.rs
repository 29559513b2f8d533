//! Heart Quest page behaviors.
//!
//! Four independent components share one wasm module: the photo/video
//! carousel with its music button, the floating hearts backdrop, the heart
//! puzzle with its unlock overlay, and the quest form checks. Each component
//! keeps its state machine in a host-testable `mod.rs` and its DOM wiring in
//! `dom.rs`; they never talk to each other.

use wasm_bindgen::prelude::*;

pub mod carousel;
mod dom;
pub mod hearts;
pub mod puzzle;
pub mod quest_form;

pub use carousel::{AdvanceMode, CarouselCommand, CarouselController, CarouselEvent, CarouselOptions};
pub use hearts::{HeartSpec, RandomSource};
pub use puzzle::{HeartPuzzle, QuestProgress, UnlockOverlay};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Start every component whose anchor exists on the current page.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    let doc = dom::document()?;
    if doc.query_selector(".carousel-container")?.is_some() {
        carousel::mount(CarouselOptions::default())?;
    }
    if doc.get_element_by_id("hearts-container").is_some() {
        hearts::mount()?;
    }
    puzzle::mount()?;
    quest_form::mount()
}

// -----------------------------------------------------------------------------
// Per-component entrypoints
// -----------------------------------------------------------------------------

/// `options` may be `undefined` or `{ intervalMs, mode: "videoAware" | "fixedInterval" }`.
#[wasm_bindgen]
pub fn start_carousel(options: JsValue) -> Result<(), JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        CarouselOptions::default()
    } else {
        let json: String = js_sys::JSON::stringify(&options)?.into();
        CarouselOptions::from_json(&json)
            .map_err(|e| JsValue::from_str(&format!("bad carousel options: {e}")))?
    };
    carousel::mount(options)
}

#[wasm_bindgen]
pub fn start_hearts() -> Result<(), JsValue> {
    hearts::mount()
}

#[wasm_bindgen]
pub fn start_heart_puzzle() -> Result<(), JsValue> {
    puzzle::mount()
}

/// Fill the piece for `count` without a reload; 4 schedules the unlock overlay.
#[wasm_bindgen]
pub fn update_heart_progress(count: u32) -> Result<(), JsValue> {
    puzzle::update_progress(count)
}

#[wasm_bindgen]
pub fn start_quest_forms() -> Result<(), JsValue> {
    quest_form::mount()
}
