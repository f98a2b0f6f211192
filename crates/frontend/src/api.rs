//! JS API: `new Tabs(container, options)`.
//!
//! ```js
//! const tabs = new Tabs(document.getElementById("container"), {
//!     initial: 2,
//!     fxFade: true,
//!     onShow: (link, shown, hidden) => console.log(link.hash),
//! });
//! tabs.disable(3);
//! tabs.activate(1);
//! ```

use crate::dom::options;
use crate::handle::TabsHandle;
use tabkit_core::Error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&format!("tabs: {}", err))
}

#[wasm_bindgen]
pub struct Tabs {
    handle: TabsHandle,
}

#[wasm_bindgen]
impl Tabs {
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: JsValue) -> Result<Tabs, JsValue> {
        let parsed = options::parse(&options).map_err(to_js)?;
        let handle = TabsHandle::attach(container, parsed.config, |surface| {
            parsed.callbacks.bind(surface)
        })
        .map_err(to_js)?;
        Ok(Tabs { handle })
    }

    #[wasm_bindgen(js_name = attachById)]
    pub fn attach_by_id(id: &str, options: JsValue) -> Result<Tabs, JsValue> {
        use wasm_bindgen::JsCast;

        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("tabs: no element with id '{}'", id)))?;
        Self::new(container, options)
    }

    /// Same as clicking the tab at `position` (1-based, default 1).
    pub fn activate(&self, position: Option<u32>) -> bool {
        self.handle.activate(position)
    }

    pub fn disable(&self, position: Option<u32>) {
        self.handle.disable(position);
    }

    pub fn enable(&self, position: Option<u32>) {
        self.handle.enable(position);
    }

    /// 1-based position of the selected tab.
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> u32 {
        self.handle.selected()
    }

    pub fn destroy(&mut self) {
        self.handle.destroy();
    }
}
