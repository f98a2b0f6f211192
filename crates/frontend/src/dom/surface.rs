//! `web-sys` implementation of [`Surface`].
//!
//! Links are `>ul:first-of-type > li > a` of the container; sections are the
//! container's direct children matching `tabStruct`, while the section a link
//! shows is looked up by the id in its fragment.

use super::animate;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use tabkit_core::auto_height::LayoutMetrics;
use tabkit_core::fx::Step;
use tabkit_core::{fragment, Error, Surface, TabsConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, Window};

/// Hidden one-letter probe shared by all containers; its height follows the
/// page font size.
const FONT_PROBE_ID: &str = "tabs-watch-font-size";

struct Inner {
    window: Window,
    document: Document,
    container: HtmlElement,
    links: Vec<HtmlAnchorElement>,
    section_selector: String,
    hide_class: String,
    font_probe: Option<HtmlElement>,
}

#[derive(Clone)]
pub struct WebSurface(Rc<Inner>);

impl WebSurface {
    pub fn discover(container: HtmlElement, config: &TabsConfig) -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoDocument)?;
        let document = window.document().ok_or(Error::NoDocument)?;

        let list = container
            .query_selector(":scope > ul")
            .ok()
            .flatten()
            .ok_or(Error::NoTabs)?;
        let links: Vec<HtmlAnchorElement> = list
            .query_selector_all(":scope > li > a")
            .map(|nodes| {
                (0..nodes.length())
                    .filter_map(|i| nodes.get(i))
                    .filter_map(|n| n.dyn_into::<HtmlAnchorElement>().ok())
                    .collect()
            })
            .unwrap_or_default();
        if links.is_empty() {
            return Err(Error::NoTabs);
        }

        let font_probe = if config.fx_auto_height {
            font_probe(&document)
        } else {
            None
        };

        Ok(Self(Rc::new(Inner {
            window,
            document,
            container,
            links,
            section_selector: config.section_selector(),
            hide_class: config.hide_class.clone(),
            font_probe,
        })))
    }

    pub fn links(&self) -> &[HtmlAnchorElement] {
        &self.0.links
    }

    pub fn link(&self, tab: usize) -> Option<&HtmlAnchorElement> {
        self.0.links.get(tab)
    }

    /// The `<li>` holding the tab link.
    pub fn item(&self, tab: usize) -> Option<Element> {
        self.link(tab).and_then(|a| a.parent_element())
    }

    /// Section the tab link points to.
    pub fn section(&self, tab: usize) -> Option<HtmlElement> {
        let id = fragment::normalize(&self.link(tab)?.hash())?;
        self.0
            .document
            .get_element_by_id(&id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// All sections of the container.
    pub fn sections(&self) -> Vec<HtmlElement> {
        let Ok(nodes) = self.0.container.query_selector_all(&self.0.section_selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    /// Height of a section as if it were shown.
    fn natural_height(&self, section: &HtmlElement) -> f64 {
        let classes = section.class_list();
        if !classes.contains(&self.0.hide_class) {
            return section.offset_height() as f64;
        }
        let style = section.style();
        let _ = style.set_property("visibility", "hidden");
        let _ = style.set_property("position", "absolute");
        let _ = classes.remove_1(&self.0.hide_class);
        let height = section.offset_height() as f64;
        let _ = classes.add_1(&self.0.hide_class);
        let _ = style.remove_property("visibility");
        let _ = style.remove_property("position");
        height
    }
}

fn font_probe(document: &Document) -> Option<HtmlElement> {
    if let Some(existing) = document.get_element_by_id(FONT_PROBE_ID) {
        return existing.dyn_into::<HtmlElement>().ok();
    }
    let probe = document
        .create_element("span")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    probe.set_id(FONT_PROBE_ID);
    probe.set_text_content(Some("M"));
    let style = probe.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("visibility", "hidden");
    document.body()?.append_child(&probe).ok()?;
    Some(probe)
}

impl Surface for WebSurface {
    fn tab_fragments(&self) -> Vec<Option<String>> {
        self.0
            .links
            .iter()
            .map(|a| fragment::normalize(&a.hash()))
            .collect()
    }

    fn location_fragment(&self) -> Option<String> {
        let hash = self.0.window.location().hash().ok()?;
        fragment::normalize(&hash)
    }

    fn has_section(&self, tab: usize) -> bool {
        self.section(tab).is_some()
    }

    fn hide_sections_except(&self, shown: usize, hide_class: &str) {
        for section in self.sections() {
            let _ = section.class_list().add_1(hide_class);
        }
        if let Some(section) = self.section(shown) {
            let _ = section.class_list().remove_1(hide_class);
        }
    }

    fn set_section_hidden(&self, tab: usize, hide_class: &str, hidden: bool) {
        if let Some(section) = self.section(tab) {
            let _ = section.class_list().toggle_with_force(hide_class, hidden);
        }
    }

    fn set_tab_class(&self, tab: usize, class: &str, on: bool) {
        if let Some(item) = self.item(tab) {
            let _ = item.class_list().toggle_with_force(class, on);
        }
    }

    fn select_tab_item(&self, tab: usize, class: &str) {
        let Some(item) = self.item(tab) else {
            return;
        };
        if let Some(list) = item.parent_element() {
            let siblings = list.children();
            for i in 0..siblings.length() {
                if let Some(sibling) = siblings.item(i) {
                    let _ = sibling.class_list().remove_1(class);
                }
            }
        }
        let _ = item.class_list().add_1(class);
    }

    fn scroll_position(&self) -> (f64, f64) {
        (
            self.0.window.scroll_x().unwrap_or(0.0),
            self.0.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.0.window.scroll_to_with_x_and_y(x, y);
    }

    fn blur_link(&self, tab: usize) {
        if let Some(link) = self.link(tab) {
            let _ = link.blur();
        }
    }

    async fn animate(&self, tab: usize, step: &Step) {
        match self.section(tab) {
            Some(section) => animate::run_step(&self.0.window, &section, step).await,
            None => TimeoutFuture::new(step.duration_ms).await,
        }
    }

    fn clear_layout_overrides(&self, tab: usize) {
        if let Some(section) = self.section(tab) {
            let style = section.style();
            let _ = style.remove_property("height");
            let _ = style.remove_property("overflow");
        }
    }

    fn report_error(&self, message: &str) {
        let _ = self.0.window.alert_with_message(message);
    }

    async fn next_tick(&self) {
        TimeoutFuture::new(0).await;
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            width: self.0.container.offset_width() as f64,
            height: self.0.container.offset_height() as f64,
            font: self
                .0
                .font_probe
                .as_ref()
                .map(|p| p.offset_height() as f64)
                .unwrap_or(0.0),
        }
    }

    fn section_heights(&self, reset: bool) -> Vec<f64> {
        self.sections()
            .iter()
            .map(|section| {
                if reset {
                    let _ = section.style().remove_property("min-height");
                }
                self.natural_height(section)
            })
            .collect()
    }

    fn set_min_height(&self, px: f64) {
        let value = format!("{}px", px);
        for section in self.sections() {
            let _ = section.style().set_property("min-height", &value);
        }
    }
}
