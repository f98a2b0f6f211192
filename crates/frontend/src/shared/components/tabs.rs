//! TabContainer - Leptos wrapper around [`TabsHandle`].
//!
//! Рендерит контейнер, после монтирования подключает к нему контроллер
//! вкладок, при очистке компонента снимает обработчики и таймер.
//!
//! ```ignore
//! let tabs = TabsRef::new();
//! view! {
//!     <TabContainer tabs_ref=tabs config=TabsConfig::starting_at(2)>
//!         <ul>
//!             <li><a href="#one">"One"</a></li>
//!             <li><a href="#two">"Two"</a></li>
//!         </ul>
//!         <div id="one">"..."</div>
//!         <div id="two">"..."</div>
//!     </TabContainer>
//! }
//! ```

use crate::dom::WebSurface;
use crate::handle::TabsHandle;
use leptos::html::Div;
use leptos::prelude::*;
use tabkit_core::{Callbacks, TabEvent, TabsConfig};
use web_sys::HtmlElement;

/// Imperative access to an attached container, usable from event handlers.
#[derive(Clone, Copy)]
pub struct TabsRef(StoredValue<Option<TabsHandle>, LocalStorage>);

impl TabsRef {
    pub fn new() -> Self {
        Self(StoredValue::new_local(None))
    }

    pub fn is_attached(&self) -> bool {
        self.0
            .try_with_value(|handle| handle.is_some())
            .unwrap_or(false)
    }

    pub fn activate(&self, position: u32) -> bool {
        self.0
            .try_with_value(|handle| {
                handle
                    .as_ref()
                    .map(|h| h.activate(Some(position)))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    pub fn disable(&self, position: u32) {
        self.0.try_with_value(|handle| {
            if let Some(h) = handle {
                h.disable(Some(position));
            }
        });
    }

    pub fn enable(&self, position: u32) {
        self.0.try_with_value(|handle| {
            if let Some(h) = handle {
                h.enable(Some(position));
            }
        });
    }

    /// 1-based selected position, `None` before mount.
    pub fn selected(&self) -> Option<u32> {
        self.0
            .try_with_value(|handle| handle.as_ref().map(TabsHandle::selected))
            .flatten()
    }

    fn attach(&self, handle: TabsHandle) {
        self.0.set_value(Some(handle));
    }

    fn detach(&self) {
        // dropping the handle removes listeners and stops the interval
        self.0.try_update_value(|handle| handle.take());
    }
}

impl Default for TabsRef {
    fn default() -> Self {
        Self::new()
    }
}

fn bind_callbacks(
    on_click: Option<Callback<TabEvent>>,
    on_hide: Option<Callback<TabEvent>>,
    on_show: Option<Callback<TabEvent>>,
) -> Callbacks {
    let mut callbacks = Callbacks::default();
    if let Some(cb) = on_click {
        callbacks = callbacks.on_click(move |e| cb.run(*e));
    }
    if let Some(cb) = on_hide {
        callbacks = callbacks.on_hide(move |e| cb.run(*e));
    }
    if let Some(cb) = on_show {
        callbacks = callbacks.on_show(move |e| cb.run(*e));
    }
    callbacks
}

#[component]
pub fn TabContainer(
    /// Widget options, defaults when omitted
    #[prop(optional)]
    config: Option<TabsConfig>,
    /// Handle for activate / disable / enable from outside
    #[prop(optional)]
    tabs_ref: Option<TabsRef>,
    #[prop(optional)]
    on_click: Option<Callback<TabEvent>>,
    #[prop(optional)]
    on_hide: Option<Callback<TabEvent>>,
    #[prop(optional)]
    on_show: Option<Callback<TabEvent>>,
    #[prop(optional, into)]
    class: String,
    /// Markup: one `<ul>` of links followed by the sections
    children: Children,
) -> impl IntoView {
    let container_ref = NodeRef::<Div>::new();
    let tabs_ref = tabs_ref.unwrap_or_default();
    let config = StoredValue::new(config.unwrap_or_default());

    Effect::new(move |_| {
        let Some(container) = container_ref.get() else {
            return;
        };
        if tabs_ref.is_attached() {
            return;
        }
        let element: HtmlElement = container.into();
        let callbacks = |_: &WebSurface| bind_callbacks(on_click, on_hide, on_show);
        match TabsHandle::attach(element, config.get_value(), callbacks) {
            Ok(handle) => tabs_ref.attach(handle),
            Err(err) => log::error!("tabs: failed to attach: {}", err),
        }
    });

    on_cleanup(move || tabs_ref.detach());

    view! {
        <div node_ref=container_ref class=class>
            {children()}
        </div>
    }
}
