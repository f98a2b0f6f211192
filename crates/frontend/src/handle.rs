//! TabsHandle - owns everything one attached container needs at runtime:
//! the controller, the link listeners, the history service and the
//! auto-height interval. Dropping the handle tears it all down.

use crate::dom::{self, BrowserHistory, WebSurface};
use gloo_timers::callback::Interval;
use std::rc::Rc;
use tabkit_core::auto_height::POLL_INTERVAL_MS;
use tabkit_core::{Callbacks, ClickSource, Error, History, Position, TabController, TabsConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

type Controller = TabController<WebSurface>;

pub struct TabsHandle {
    controller: Rc<Controller>,
    listeners: Vec<(HtmlElement, Closure<dyn FnMut(MouseEvent)>)>,
    history: Option<Rc<BrowserHistory>>,
    auto_height: Option<Interval>,
}

impl TabsHandle {
    /// Wires a container that already holds the tab markup.
    pub fn attach(
        container: HtmlElement,
        config: TabsConfig,
        callbacks: impl FnOnce(&WebSurface) -> Callbacks,
    ) -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoDocument)?;
        let capabilities = dom::detect_capabilities(&window);
        let surface = WebSurface::discover(container, &config)?;
        let links: Vec<HtmlElement> = surface
            .links()
            .iter()
            .map(|a| a.clone().unchecked_into::<HtmlElement>())
            .collect();

        let history = config
            .bookmarkable
            .then(|| BrowserHistory::new(window.clone(), capabilities));
        let callbacks = callbacks(&surface);
        let auto_height = config.fx_auto_height;

        let controller = TabController::init(
            surface,
            config,
            callbacks,
            history.clone().map(|h| h as Rc<dyn History>),
            capabilities,
        )?;

        let listeners = links
            .into_iter()
            .enumerate()
            .map(|(index, link)| {
                let controller = controller.clone();
                let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
                    let response = controller.click(index, ClickSource::User);
                    if response.prevent_default {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(MouseEvent)>);
                let _ = link
                    .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                (link, on_click)
            })
            .collect();

        let auto_height = auto_height.then(|| {
            let weak = Rc::downgrade(&controller);
            Interval::new(POLL_INTERVAL_MS, move || {
                if let Some(controller) = weak.upgrade() {
                    controller.poll_auto_height();
                }
            })
        });

        Ok(Self {
            controller,
            listeners,
            history,
            auto_height,
        })
    }

    /// `activate(position)`, 1-based; `None` means the first tab.
    pub fn activate(&self, position: Option<u32>) -> bool {
        self.controller.activate(Position::or_first(position))
    }

    pub fn disable(&self, position: Option<u32>) {
        self.controller.disable(Position::or_first(position));
    }

    pub fn enable(&self, position: Option<u32>) {
        self.controller.enable(Position::or_first(position));
    }

    pub fn selected(&self) -> u32 {
        self.controller.selected().get()
    }

    /// Removes listeners and stops the auto-height interval.
    pub fn destroy(&mut self) {
        for (link, listener) in self.listeners.drain(..) {
            let _ = link
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
        if let Some(history) = self.history.take() {
            history.dispose();
        }
        // dropping the interval clears it
        self.auto_height = None;
    }
}

impl Drop for TabsHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}
