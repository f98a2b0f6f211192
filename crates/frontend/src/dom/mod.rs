//! Browser binding of the tab controller.
//!
//! Содержит:
//! - `surface` - реализация `Surface` поверх web-sys
//! - `animate` - шаги анимации через Web Animations API
//! - `history` - синхронизация фрагмента URL и кнопки "назад"
//! - `options` - разбор JS-объекта опций

pub mod animate;
pub mod history;
pub mod options;
pub mod surface;

pub use history::BrowserHistory;
pub use surface::WebSurface;

use js_sys::Reflect;
use tabkit_core::Capabilities;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Resolves browser capabilities once, at attach time.
pub fn detect_capabilities(window: &Window) -> Capabilities {
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let history_api = window
        .history()
        .ok()
        .map(|history| Reflect::has(&history, &JsValue::from_str("pushState")).unwrap_or(false))
        .unwrap_or(false);
    let capabilities = Capabilities::detect(&user_agent, history_api);
    log::debug!("tabs: detected {:?}", capabilities);
    capabilities
}
