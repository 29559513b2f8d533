use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::{HEART_COUNT, HeartSpec, RandomSource, generate_hearts};
use crate::dom;

/// Browser randomness: getrandom when the `rng` feature is on, Math.random otherwise.
struct BrowserRandom;

impl RandomSource for BrowserRandom {
    #[cfg(feature = "rng")]
    fn next_f64(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_err() {
            return js_sys::Math::random();
        }
        // 53 random mantissa bits -> [0, 1)
        (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
    }

    #[cfg(not(feature = "rng"))]
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

fn heart_element(doc: &web_sys::Document, spec: &HeartSpec) -> Result<HtmlElement, JsValue> {
    let heart: HtmlElement = doc.create_element("div")?.dyn_into()?;
    heart.set_class_name("heart");
    heart.class_list().add_1(spec.size.class_name())?;
    dom::set_style(&heart, "left", &spec.left_css());
    dom::set_style(&heart, "animation-duration", &spec.duration_css());
    dom::set_style(&heart, "animation-delay", &spec.delay_css());
    Ok(heart)
}

/// Fill `#hearts-container` once the document is ready. The hearts are never
/// touched again.
pub fn mount() -> Result<(), JsValue> {
    dom::on_ready(|| {
        let win = dom::window()?;
        let doc = dom::document()?;
        let container = dom::require_id(&doc, "hearts-container")?;
        let width = win.inner_width()?.as_f64().unwrap_or(0.0);
        for spec in generate_hearts(HEART_COUNT, width, &mut BrowserRandom) {
            let heart = heart_element(&doc, &spec)?;
            container.append_child(&heart)?;
        }
        Ok(())
    })
}
