//! JS options object -> [`TabsConfig`] + callbacks.
//!
//! Function-valued entries (`onClick`, `onHide`, `onShow`) are picked out
//! first; the rest goes through `serde-wasm-bindgen`.

use super::WebSurface;
use js_sys::{Array, Function, Object, Reflect};
use tabkit_core::{Callbacks, Error, TabEvent, TabsConfig};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Default)]
pub struct JsCallbacks {
    pub on_click: Option<Function>,
    pub on_hide: Option<Function>,
    pub on_show: Option<Function>,
}

pub struct ParsedOptions {
    pub config: TabsConfig,
    pub callbacks: JsCallbacks,
}

pub fn parse(options: &JsValue) -> Result<ParsedOptions, Error> {
    if options.is_undefined() || options.is_null() {
        return Ok(ParsedOptions {
            config: TabsConfig::default(),
            callbacks: JsCallbacks::default(),
        });
    }
    if !options.is_object() {
        return Err(Error::InvalidOptions("options must be an object".into()));
    }

    let plain = Object::new();
    for entry in Object::entries(options.unchecked_ref::<Object>()).iter() {
        let pair: Array = entry.unchecked_into();
        let value = pair.get(1);
        if value.is_function() {
            continue;
        }
        let _ = Reflect::set(&plain, &pair.get(0), &value);
    }

    let config: TabsConfig = serde_wasm_bindgen::from_value(plain.into())
        .map_err(|e| Error::InvalidOptions(e.to_string()))?;

    let function = |name: &str| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
    };

    Ok(ParsedOptions {
        config,
        callbacks: JsCallbacks {
            on_click: function("onClick"),
            on_hide: function("onHide"),
            on_show: function("onShow"),
        },
    })
}

impl JsCallbacks {
    /// Binds the JS functions to the surface so they receive
    /// `(link, shownSection, hiddenSection)` elements.
    pub fn bind(self, surface: &WebSurface) -> Callbacks {
        let mut callbacks = Callbacks::default();
        if let Some(f) = self.on_click {
            callbacks = callbacks.on_click(invoke(f, surface.clone(), "onClick"));
        }
        if let Some(f) = self.on_hide {
            callbacks = callbacks.on_hide(invoke(f, surface.clone(), "onHide"));
        }
        if let Some(f) = self.on_show {
            callbacks = callbacks.on_show(invoke(f, surface.clone(), "onShow"));
        }
        callbacks
    }
}

fn invoke(function: Function, surface: WebSurface, name: &'static str) -> impl Fn(&TabEvent) {
    move |event| {
        let link = surface
            .link(event.clicked)
            .map(|a| JsValue::from(a.clone()))
            .unwrap_or(JsValue::UNDEFINED);
        let shown = surface
            .section(event.to_show)
            .map(JsValue::from)
            .unwrap_or(JsValue::UNDEFINED);
        let hidden = event
            .to_hide
            .and_then(|i| surface.section(i))
            .map(JsValue::from)
            .unwrap_or(JsValue::UNDEFINED);
        if let Err(err) = function.call3(&JsValue::NULL, &link, &shown, &hidden) {
            log::error!("tabs: {} callback threw: {:?}", name, err);
        }
    }
}
