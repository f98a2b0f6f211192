//! Runs a transition [`Step`] with the Web Animations API.
//!
//! Plain steps only wait for their duration. Animated steps build a
//! two-keyframe animation from [`Step::tracks`] and await its `finished`
//! promise, falling back to a timer when the engine has no `animate()`.

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Promise, Reflect};
use tabkit_core::fx::{Measure, Step, Track};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, Window};

struct ElementMeasure<'a> {
    window: &'a Window,
    element: &'a HtmlElement,
}

impl Measure for ElementMeasure<'_> {
    fn natural(&self, property: &str) -> String {
        match property {
            "height" => format!("{}px", self.element.scroll_height()),
            "width" => format!("{}px", self.element.scroll_width()),
            "opacity" => "1".to_string(),
            other => self.current(other),
        }
    }

    fn current(&self, property: &str) -> String {
        self.window
            .get_computed_style(self.element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "0".to_string())
    }
}

fn keyframes(tracks: &[Track]) -> Object {
    let from = Object::new();
    let to = Object::new();
    for track in tracks {
        let key = JsValue::from_str(&track.js_property());
        let _ = Reflect::set(&from, &key, &JsValue::from_str(&track.from));
        let _ = Reflect::set(&to, &key, &JsValue::from_str(&track.to));
    }
    let frames = Array::new();
    frames.push(&from);
    frames.push(&to);
    frames.into()
}

pub async fn run_step(window: &Window, element: &HtmlElement, step: &Step) {
    if step.is_plain() {
        TimeoutFuture::new(step.duration_ms).await;
        return;
    }

    let measure = ElementMeasure { window, element };
    let tracks = step.tracks(&measure);
    if step.affects_layout() {
        let _ = element.style().set_property("overflow", "hidden");
    }

    match start_animation(element, &keyframes(&tracks), step.duration_ms) {
        Some(finished) => {
            if let Err(err) = JsFuture::from(finished).await {
                // cancelled, e.g. the element was removed
                log::debug!("tab animation did not finish: {:?}", err);
            }
        }
        None => TimeoutFuture::new(step.duration_ms).await,
    }
}

/// `element.animate(keyframes, duration).finished`, looked up at runtime.
fn start_animation(element: &HtmlElement, frames: &Object, duration_ms: u32) -> Option<Promise> {
    let animate = Reflect::get(element, &JsValue::from_str("animate"))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    let animation = animate
        .call2(element, frames, &JsValue::from_f64(duration_ms as f64))
        .ok()?;
    Reflect::get(&animation, &JsValue::from_str("finished"))
        .ok()?
        .dyn_into::<Promise>()
        .ok()
}
