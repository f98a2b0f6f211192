//! Browser history service behind [`History`].
//!
//! Listens to `hashchange` and `popstate` to follow back/forward, and writes
//! the fragment with the strategy the capabilities picked.

use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use tabkit_core::{fragment, Capabilities, FragmentUpdate, History, HistoryHooks};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, Window};

const NAVIGATION_EVENTS: [&str; 2] = ["hashchange", "popstate"];

pub struct BrowserHistory {
    window: Window,
    capabilities: Capabilities,
    /// Last fragment seen or written, to drop duplicate events.
    last: Rc<RefCell<Option<String>>>,
    listener: RefCell<Option<Closure<dyn FnMut(Event)>>>,
}

impl BrowserHistory {
    pub fn new(window: Window, capabilities: Capabilities) -> Rc<Self> {
        Rc::new(Self {
            window,
            capabilities,
            last: Rc::new(RefCell::new(None)),
            listener: RefCell::new(None),
        })
    }

    fn current_fragment(window: &Window) -> Option<String> {
        window
            .location()
            .hash()
            .ok()
            .and_then(|h| fragment::normalize(&h))
    }

    /// Removes the navigation listeners. Called on teardown.
    pub fn dispose(&self) {
        if let Some(listener) = self.listener.borrow_mut().take() {
            for name in NAVIGATION_EVENTS {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
        }
    }
}

impl History for BrowserHistory {
    fn register(&self, fragments: &[String], hooks: HistoryHooks) {
        log::debug!("history: registered {} tab fragments", fragments.len());
        self.dispose();

        let HistoryHooks {
            on_ready,
            on_navigate,
        } = hooks;

        let window = self.window.clone();
        *self.last.borrow_mut() = Self::current_fragment(&window);
        let last = self.last.clone();
        let listener = Closure::wrap(Box::new(move |_: Event| {
            let current = Self::current_fragment(&window);
            // hashchange and popstate both fire for one traversal
            if *last.borrow() == current {
                return;
            }
            *last.borrow_mut() = current.clone();
            on_navigate(current);
        }) as Box<dyn FnMut(Event)>);

        for name in NAVIGATION_EVENTS {
            let _ = self
                .window
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        *self.listener.borrow_mut() = Some(listener);

        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_ready();
        });
    }

    fn update_fragment(&self, fragment: &str) {
        let hash = fragment::to_hash(fragment);
        let location = self.window.location();
        let result = match self.capabilities.fragment_update() {
            FragmentUpdate::PushState => match self.window.history() {
                Ok(history) => history.push_state_with_url(&JsValue::NULL, "", Some(hash.as_str())),
                Err(err) => Err(err),
            },
            FragmentUpdate::Assign => location.set_hash(&hash),
            // no new history entry on this path
            FragmentUpdate::Replace => location.href().and_then(|href| {
                let base = href.split('#').next().unwrap_or(&href).to_string();
                location.replace(&format!("{}{}", base, hash))
            }),
        };
        match result {
            Ok(()) => *self.last.borrow_mut() = Some(fragment.to_string()),
            Err(err) => log::warn!("history: failed to update fragment '{}': {:?}", fragment, err),
        }
    }
}

impl Drop for BrowserHistory {
    fn drop(&mut self) {
        self.dispose();
    }
}
